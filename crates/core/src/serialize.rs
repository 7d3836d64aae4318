// serde support: a settings tree is a map of box names to maps of pair values
//
//   { "network": { "host": "127.0.0.1", "port": "8080" } }
//
// Deserializing goes through find-or-create, so a repeated box or pair name
// merges into the first occurrence instead of adding a second entry.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::section::Section;
use crate::settings::Settings;

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for pair in self.pairs() {
            map.serialize_entry(pair.name(), pair.as_str())?;
        }
        map.end()
    }
}

impl Serialize for Settings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for section in self.sections() {
            map.serialize_entry(section.name(), section)?;
        }
        map.end()
    }
}

/// Entries of one box object in document order, duplicates included.
struct PairList(Vec<(String, String)>);

struct PairListVisitor;

impl<'de> Visitor<'de> for PairListVisitor {
    type Value = PairList;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of pair names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PairList, A::Error> {
        let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<String, String>()? {
            pairs.push(entry);
        }
        Ok(PairList(pairs))
    }
}

impl<'de> Deserialize<'de> for PairList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PairListVisitor)
    }
}

struct SettingsVisitor;

impl<'de> Visitor<'de> for SettingsVisitor {
    type Value = Settings;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of box names to pair maps")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Settings, A::Error> {
        let mut settings = Settings::new();
        while let Some((name, PairList(pairs))) = access.next_entry::<String, PairList>()? {
            let section = settings.section(&name);
            for (pair, value) in pairs {
                section.entry(&pair).set(value);
            }
        }
        Ok(settings)
    }
}

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SettingsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_preserves_order() {
        let mut settings = Settings::new();
        settings.section("second").entry("b").set("2");
        settings.section("first").entry("a").set("1");
        settings.section("first").entry("c").set(true);

        assert_eq!(
            serde_json::to_string(&settings).unwrap(),
            r#"{"second":{"b":"2"},"first":{"a":"1","c":"1"}}"#
        );
    }

    #[test]
    fn test_deserialize_keeps_names_unique() {
        let json = r#"{"a": {"k": "1", "k": "2"}, "b": {}, "a": {"j": "3", "k": "4"}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = settings.sections().map(|s| s.name()).collect();
        assert_eq!(names, vec!["a", "b"]);

        let pairs: Vec<(&str, &str)> = settings
            .get("a")
            .unwrap()
            .pairs()
            .map(|p| (p.name(), p.as_str()))
            .collect();
        assert_eq!(pairs, vec![("k", "4"), ("j", "3")]);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::new();
        settings.section("net").entry("host").set("example.org");
        settings.section("net").entry("port").set(8080);
        settings.section("empty");

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_deserialize_rejects_non_string_values() {
        assert!(serde_json::from_str::<Settings>(r#"{"a": {"k": 1}}"#).is_err());
        assert!(serde_json::from_str::<Settings>(r#"["a"]"#).is_err());
    }
}
