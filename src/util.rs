//! Small utility helpers used across modules.

use serde::{Deserialize, Deserializer};

/// Integer as the browser client sends it: a JSON number or a numeric string ("2").
#[derive(Deserialize)]
#[serde(untagged)]
enum WireInt {
  Int(i64),
  Str(String),
}

impl WireInt {
  fn parse<E: serde::de::Error>(self) -> Result<i64, E> {
    match self {
      WireInt::Int(v) => Ok(v),
      WireInt::Str(s) => s.trim().parse::<i64>().map_err(|_| E::custom(format!("not an integer: {:?}", s))),
    }
  }
}

/// `deserialize_with` for `i64` fields that may arrive as strings.
pub fn lenient_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
  WireInt::deserialize(d)?.parse()
}

/// `deserialize_with` for optional integers; `null` and `""` both mean absent.
pub fn lenient_i64_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
  match Option::<WireInt>::deserialize(d)? {
    None => Ok(None),
    Some(WireInt::Str(s)) if s.trim().is_empty() => Ok(None),
    Some(v) => v.parse().map(Some),
  }
}

/// `deserialize_with` for lists of integers (e.g. previously served question ids).
pub fn lenient_i64_vec<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<i64>, D::Error> {
  Vec::<WireInt>::deserialize(d)?.into_iter().map(WireInt::parse).collect()
}

/// Log-safe truncation for large strings.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) { cut -= 1; }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}
