use aws_sdk_ec2::types::Tag;
use std::collections::BTreeMap;
use tracing::debug;

pub(super) const TAG_NAME: &str = "Name";

/// Converts SDK tags into a key/value map.
///
/// Tags without a key are dropped, a missing value becomes an empty string, and if a
/// key appears twice the first occurrence wins.
pub(super) fn tags_to_map(instance_id: &str, tags: &[Tag]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();

    for tag in tags {
        let Some(key) = tag.key() else {
            debug!(instance_id = %instance_id, "Ignoring tag without key");
            continue;
        };

        if map.contains_key(key) {
            debug!(
                instance_id = %instance_id,
                tag_key = %key,
                "Duplicate tag key, keeping first occurrence"
            );
            continue;
        }

        map.insert(key.to_string(), tag.value().unwrap_or_default().to_string());
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_tag(key: &str, value: &str) -> Tag {
        Tag::builder().key(key).value(value).build()
    }

    #[test]
    fn test_empty_tags() {
        assert!(tags_to_map("i-1", &[]).is_empty());
    }

    #[test]
    fn test_tags_are_mapped_by_key() {
        let tags = vec![
            create_tag("Name", "my-instance"),
            create_tag("Environment", "production"),
        ];
        let map = tags_to_map("i-1", &tags);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Name").map(String::as_str), Some("my-instance"));
        assert_eq!(
            map.get("Environment").map(String::as_str),
            Some("production")
        );
    }

    #[test]
    fn test_duplicate_key_keeps_first_occurrence() {
        let tags = vec![
            create_tag("Environment", "prod"),
            create_tag("Environment", "dev"),
        ];
        let map = tags_to_map("i-1", &tags);

        assert_eq!(map.get("Environment").map(String::as_str), Some("prod"));
    }

    #[test]
    fn test_tag_without_key_is_dropped() {
        let tags = vec![
            Tag::builder().value("orphan").build(),
            create_tag("Name", "my-instance"),
        ];
        let map = tags_to_map("i-1", &tags);

        assert_eq!(map.len(), 1);
        assert!(map.contains_key("Name"));
    }

    #[test]
    fn test_tag_without_value_maps_to_empty_string() {
        let tags = vec![Tag::builder().key("Environment").build()];
        let map = tags_to_map("i-1", &tags);

        assert_eq!(map.get("Environment").map(String::as_str), Some(""));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let tags = vec![
            create_tag("environment", "dev"),
            create_tag("Environment", "prod"),
        ];
        let map = tags_to_map("i-1", &tags);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Environment").map(String::as_str), Some("prod"));
    }
}
