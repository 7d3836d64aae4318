// Typed views selectable with --as

use boxkv_core::Pair;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    /// Raw string value
    Str,
    /// Signed 32-bit integer
    I32,
    /// Unsigned 32-bit integer
    U32,
    /// 32-bit float
    F32,
    /// Boolean (stored as 1 / 0)
    Bool,
}

impl ValueKind {
    /// Render the pair through this view.
    pub fn view(self, pair: &Pair) -> String {
        match self {
            ValueKind::Str => pair.as_str().to_string(),
            ValueKind::I32 => pair.as_i32().to_string(),
            ValueKind::U32 => pair.as_u32().to_string(),
            ValueKind::F32 => pair.as_f32().to_string(),
            ValueKind::Bool => pair.as_bool().to_string(),
        }
    }

    /// Parse `input` strictly and store it through the matching typed setter.
    pub fn assign(self, pair: &mut Pair, input: &str) -> Result<(), String> {
        match self {
            ValueKind::Str => {
                pair.set(input);
            }
            ValueKind::I32 => {
                let v: i32 = input.trim().parse().map_err(|e| format!("invalid i32 '{input}': {e}"))?;
                pair.set(v);
            }
            ValueKind::U32 => {
                let v: u32 = input.trim().parse().map_err(|e| format!("invalid u32 '{input}': {e}"))?;
                pair.set(v);
            }
            ValueKind::F32 => {
                let v: f32 = input.trim().parse().map_err(|e| format!("invalid f32 '{input}': {e}"))?;
                pair.set(v);
            }
            ValueKind::Bool => {
                pair.set(parse_bool(input)?);
            }
        }
        Ok(())
    }
}

fn parse_bool(input: &str) -> Result<bool, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(format!("invalid bool '{input}' (expected true/false, 1/0, yes/no, on/off)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_bool_words() {
        let mut pair = Pair::new("flag");
        ValueKind::Bool.assign(&mut pair, "Yes").unwrap();
        assert_eq!(pair.as_str(), "1");
        ValueKind::Bool.assign(&mut pair, "off").unwrap();
        assert_eq!(pair.as_str(), "0");
        assert!(ValueKind::Bool.assign(&mut pair, "maybe").is_err());
    }

    #[test]
    fn test_assign_numbers_strictly() {
        let mut pair = Pair::new("n");
        ValueKind::I32.assign(&mut pair, " -12 ").unwrap();
        assert_eq!(pair.as_str(), "-12");
        assert!(ValueKind::U32.assign(&mut pair, "-1").is_err());
        assert!(ValueKind::I32.assign(&mut pair, "12abc").is_err());
        assert_eq!(pair.as_str(), "-12");

        ValueKind::F32.assign(&mut pair, "0.5").unwrap();
        assert_eq!(pair.as_str(), "0.500000");
    }

    #[test]
    fn test_view_is_permissive() {
        let mut pair = Pair::new("n");
        pair.set("8080 # port");
        assert_eq!(ValueKind::Str.view(&pair), "8080 # port");
        assert_eq!(ValueKind::I32.view(&pair), "8080");
        assert_eq!(ValueKind::F32.view(&pair), "8080");
        assert_eq!(ValueKind::Bool.view(&pair), "false");
    }
}
