use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "tracks": { "type": "array", "items": { "$ref": "#/$defs/track" } },
            "components": { "type": "array", "items": { "type": "string", "minLength": 1 } },
            "catalog": {
                "type": "object",
                "required": ["url"],
                "properties": {
                    "url": { "type": "string" },
                    "product_area": { "type": "string" }
                }
            },
            "discovery": {
                "type": "object",
                "properties": {
                    "base_url": { "type": "string" },
                    "panels": { "type": "array", "items": { "type": "string" } },
                    "exclude_keywords": { "type": "array", "items": { "type": "string" } },
                    "default_exclude": { "type": "array", "items": { "type": "string" } }
                }
            },
            "fetch": {
                "type": "object",
                "properties": {
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "user_agent": { "type": "string" }
                }
            },
            "scan": {
                "type": "object",
                "properties": {
                    "max_concurrent_tracks": { "type": "integer", "minimum": 1 }
                }
            },
            "output": {
                "type": "object",
                "properties": {
                    "directory": { "type": "string" },
                    "formats": {
                        "type": "array",
                        "items": { "type": "string", "enum": ["markdown", "html", "json"] }
                    }
                }
            }
        },
        "$defs": {
            "track": {
                "type": "object",
                "required": ["name", "url"],
                "properties": {
                    "name": { "type": "string" },
                    "url": { "type": "string" }
                }
            }
        }
    })
});
