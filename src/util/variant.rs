use std::fmt;

// Actorの引数
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Int(i64),
    Bool(bool),
}

impl Variant {
    pub fn as_int(&self) -> Option<i64> {
        if let &Self::Int(v) = self {
            return Some(v);
        }
        None
    }

    // 自身と同じ型として文字列をパース
    pub fn parse_as(&self, value: &str) -> Result<Variant, String> {
        Ok(match self {
            Variant::Int(_) => Variant::Int(value.parse::<i64>().map_err(|e| e.to_string())?),
            Variant::Bool(_) => Variant::Bool(value.parse::<bool>().map_err(|e| e.to_string())?),
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Arg {
    pub name: String,
    pub value: Variant,
}

impl Arg {
    pub fn int(name: &str, value: i64) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::Int(value),
        }
    }
}

#[test]
fn test_parse_as() {
    assert_eq!(Variant::Int(0).parse_as("42"), Ok(Variant::Int(42)));
    assert_eq!(Variant::Bool(false).parse_as("true"), Ok(Variant::Bool(true)));
    assert!(Variant::Int(0).parse_as("x").is_err());
    assert_eq!(Variant::Int(7).as_int(), Some(7));
    assert_eq!(Variant::Bool(true).as_int(), None);
}
