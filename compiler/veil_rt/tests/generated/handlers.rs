// Generated by veil. Do not edit.
// Namespace: acme::masks

use veil_rt::{BuiltinHandler, Category, Dispatch, DispatchError, MaskHandler, Value};

/// Rule `public`: STRING.
pub struct PublicStringHandler;

impl MaskHandler for PublicStringHandler {
    fn mask(&self, value: Value, dispatch: &Dispatch<'_>) -> Result<Value, DispatchError> {
        BuiltinHandler(Category::String).mask(value, dispatch)
    }
}

/// Rule `public`: PRIMITIVE_WRAPPER.
pub struct PublicPrimitiveWrapperHandler;

impl MaskHandler for PublicPrimitiveWrapperHandler {
    fn mask(&self, value: Value, dispatch: &Dispatch<'_>) -> Result<Value, DispatchError> {
        BuiltinHandler(Category::PrimitiveWrapper).mask(value, dispatch)
    }
}

/// Rule `public`: COLLECTION.
pub struct PublicCollectionHandler;

impl MaskHandler for PublicCollectionHandler {
    fn mask(&self, value: Value, dispatch: &Dispatch<'_>) -> Result<Value, DispatchError> {
        BuiltinHandler(Category::Collection).mask(value, dispatch)
    }
}

/// Rule `public`: masks `acme::User`.
pub struct PublicUserHandler;

impl MaskHandler for PublicUserHandler {
    fn mask(&self, value: Value, dispatch: &Dispatch<'_>) -> Result<Value, DispatchError> {
        let Value::Object(mut object) = value else {
            return Ok(value);
        };
        if let Some(slot) = object.get_mut("email") {
            *slot = Value::Null;
        }
        if let Some(slot) = object.get_mut("age") {
            let field = std::mem::replace(slot, Value::Null);
            *slot = if !field.is_null() && ((field < Value::from(18_i64))) {
                Value::Null
            } else {
                dispatch.apply(field)?
            };
        }
        if let Some(slot) = object.get_mut("score") {
            let field = std::mem::replace(slot, Value::Null);
            *slot = if !field.is_null() && ((field.three_way(&Value::from(0.5_f64)).is_some_and(|ord| ord >= 0))) {
                Value::Null
            } else {
                dispatch.apply(field)?
            };
        }
        if let Some(slot) = object.get_mut("nick") {
            let field = std::mem::replace(slot, Value::Null);
            *slot = if !field.is_null() && ((field.eq(&Value::from("root")))) {
                Value::Null
            } else {
                dispatch.apply(field)?
            };
        }
        if let Some(slot) = object.get_mut("tags") {
            let field = std::mem::replace(slot, Value::Null);
            *slot = dispatch.apply(field)?;
        }
        Ok(Value::Object(object))
    }
}

/// Rule `audit`: masks `acme::Note`.
pub struct AuditNoteHandler;

impl MaskHandler for AuditNoteHandler {
    fn mask(&self, value: Value, _dispatch: &Dispatch<'_>) -> Result<Value, DispatchError> {
        Ok(value)
    }
}
