use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type PageInfo = BTreeMap<String, PageValue>;

/// One page-metadata value as it arrives from content front matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageValue {
    Scalar(String),
    Sequence(Vec<String>),
    Nested(PageInfo),
    /// Numbers, booleans, nulls and mixed arrays; never translated.
    Other(serde_json::Value),
}

impl PageValue {
    pub fn is_empty(&self) -> bool {
        match self {
            PageValue::Scalar(text) => text.is_empty(),
            PageValue::Sequence(items) => items.is_empty(),
            PageValue::Nested(fields) => fields.is_empty(),
            PageValue::Other(_) => false,
        }
    }
}

/// Translates the listed `fields` of `pageinfo`. Nested maps are walked with
/// the same field list; fields that are absent or empty are left alone.
pub fn translate_pageinfo<F>(
    mut pageinfo: PageInfo,
    fields: &[String],
    translate: &mut F,
) -> PageInfo
where
    F: FnMut(&str) -> String,
{
    for field in fields {
        let Some(value) = pageinfo.remove(field) else {
            continue;
        };
        let value = if value.is_empty() {
            value
        } else {
            translate_value(value, fields, translate)
        };
        pageinfo.insert(field.clone(), value);
    }
    pageinfo
}

fn translate_value<F>(value: PageValue, fields: &[String], translate: &mut F) -> PageValue
where
    F: FnMut(&str) -> String,
{
    match value {
        PageValue::Scalar(text) => PageValue::Scalar(translate(text.as_str())),
        PageValue::Sequence(items) => {
            PageValue::Sequence(items.iter().map(|item| translate(item.as_str())).collect())
        }
        PageValue::Nested(inner) => {
            PageValue::Nested(translate_pageinfo(inner, fields, translate))
        }
        other @ PageValue::Other(_) => other,
    }
}
