//! Type values and the structural compatibility relation.
//!
//! Compatibility is structural, not nominal: functions compare arity,
//! variadic flags and element-wise parameter/return types; objects compare
//! field sets by name. `Any` is the wildcard and is compatible with
//! everything, in both directions.

use std::collections::HashMap;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl Display for IntWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IntWidth::I8 => "i8",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
            IntWidth::U8 => "u8",
            IntWidth::U16 => "u16",
            IntWidth::U32 => "u32",
            IntWidth::U64 => "u64",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Void,
    String,
    Int(IntWidth),
    Float,
    Any,
    Function(FunctionType),
    Object(ObjectType),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub return_type: Box<Type>,
    /// Ordered fixed parameter types.
    pub params: Vec<Type>,
    /// Minimum argument count a call must supply.
    pub required_args: usize,
    pub is_variadic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    /// Field order is irrelevant.
    pub fields: HashMap<String, Type>,
}

impl Type {
    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Int(_))
    }

    /// Structural compatibility, oriented: `self` is the expected/required
    /// type and `other` the actual/provided one. For objects every field
    /// the expected type names must exist on the actual type with a
    /// compatible type, so a wider actual object satisfies a narrower
    /// expectation (width subtyping).
    pub fn is_compatible_with(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Any, _) | (_, Type::Any) => true,
            (Type::Function(expected), Type::Function(actual)) => {
                expected.is_variadic == actual.is_variadic
                    && expected.params.len() == actual.params.len()
                    && expected
                        .params
                        .iter()
                        .zip(actual.params.iter())
                        .all(|(e, a)| e.is_compatible_with(a))
                    && expected.return_type.is_compatible_with(&actual.return_type)
            }
            (Type::Object(expected), Type::Object(actual)) => {
                expected.fields.len() <= actual.fields.len()
                    && expected.fields.iter().all(|(name, ty)| {
                        actual
                            .fields
                            .get(name)
                            .map(|field| ty.is_compatible_with(field))
                            .unwrap_or(false)
                    })
            }
            _ => self == other,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::String => write!(f, "string"),
            Type::Int(width) => write!(f, "{}", width),
            Type::Float => write!(f, "float"),
            Type::Any => write!(f, "any"),
            Type::Function(function) => {
                let params = function
                    .params
                    .iter()
                    .map(|ty| ty.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                if function.is_variadic {
                    write!(f, "fn({}, ...) -> {}", params, function.return_type)
                } else {
                    write!(f, "fn({}) -> {}", params, function.return_type)
                }
            }
            Type::Object(object) => {
                // Sorted so the rendering is stable.
                let mut names: Vec<&String> = object.fields.keys().collect();
                names.sort();
                let fields = names
                    .iter()
                    .map(|name| format!("{}: {}", name, object.fields[*name]))
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "{{ {} }}", fields)
            }
        }
    }
}
