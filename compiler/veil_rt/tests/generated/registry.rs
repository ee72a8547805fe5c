// Generated by veil. Do not edit.
// Namespace: acme::masks

#![allow(non_snake_case)]

use veil_rt::{LoadError, Registry, RegistryBuilder, HandlerId};

use super::handlers;

/// Registered handler ids, one per accessor.
pub struct Handlers {
    pub public_string_handler: HandlerId,
    pub public_primitive_wrapper_handler: HandlerId,
    pub public_collection_handler: HandlerId,
    pub public_user_handler: HandlerId,
    pub audit_note_handler: HandlerId,
}

/// Build the masking registry. Call once and share the result.
pub fn init_registry() -> Result<Registry, LoadError> {
    let mut builder = RegistryBuilder::new();
    let ids = Handlers {
        public_string_handler: builder.handler("public_string_handler", Box::new(handlers::PublicStringHandler))?,
        public_primitive_wrapper_handler: builder.handler("public_primitive_wrapper_handler", Box::new(handlers::PublicPrimitiveWrapperHandler))?,
        public_collection_handler: builder.handler("public_collection_handler", Box::new(handlers::PublicCollectionHandler))?,
        public_user_handler: builder.handler("public_user_handler", Box::new(handlers::PublicUserHandler))?,
        audit_note_handler: builder.handler("audit_note_handler", Box::new(handlers::AuditNoteHandler))?,
    };
    builder.rule("public", None)?;
    builder.rule("audit", Some(veil_rt::Fallback::Passthrough))?;
    chainedMethod1(&mut builder, &ids)?;
    chainedMethod2(&mut builder, &ids)?;
    Ok(builder.build())
}

fn chainedMethod1(builder: &mut RegistryBuilder, ids: &Handlers) -> Result<(), LoadError> {
    builder.insert("public", "String", ids.public_string_handler)?;
    builder.insert("public", "i32", ids.public_primitive_wrapper_handler)?;
    builder.insert("public", "f64", ids.public_primitive_wrapper_handler)?;
    Ok(())
}

fn chainedMethod2(builder: &mut RegistryBuilder, ids: &Handlers) -> Result<(), LoadError> {
    builder.insert("public", "Vec<String>", ids.public_collection_handler)?;
    builder.insert("public", "acme::User", ids.public_user_handler)?;
    builder.insert("audit", "acme::Note", ids.audit_note_handler)?;
    Ok(())
}
