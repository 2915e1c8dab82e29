//! Popup-Inhalt für ein angeklicktes Feature.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::feature::Feature;

/// Hinweis für Features ohne Properties-Objekt.
pub const NO_PROPERTIES_NOTICE: &str = "Keine Eigenschaften gefunden.";

static HEADLINE_KEY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new("(?i)id|name|identifier").ok());

/// Ein angezeigtes Key/Value-Paar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPair {
    pub key: String,
    pub value: String,
}

/// Anzeige-Datensatz eines Features.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupDescription {
    /// Erstes Property, dessen Key wie eine Kennung aussieht
    pub headline: Option<PropertyPair>,
    /// Alle Properties in Dokument-Reihenfolge
    pub properties: Vec<PropertyPair>,
    /// Gesetzt, wenn das Feature kein Properties-Objekt hat
    pub notice: Option<String>,
}

impl PopupDescription {
    /// Kopfzeile im Format `key: value`.
    pub fn headline_text(&self) -> Option<String> {
        self.headline
            .as_ref()
            .map(|pair| format!("{}: {}", pair.key, pair.value))
    }

    /// Flache Paarliste: Headline zuerst, danach der vollständige Dump.
    pub fn pairs(&self) -> Vec<PropertyPair> {
        self.headline
            .iter()
            .chain(self.properties.iter())
            .cloned()
            .collect()
    }
}

/// Beschreibt ein Feature für das Popup. Verändert nichts.
pub fn describe(feature: &Feature) -> PopupDescription {
    let Some(properties) = feature.properties.as_ref() else {
        return PopupDescription {
            notice: Some(NO_PROPERTIES_NOTICE.to_string()),
            ..Default::default()
        };
    };

    let pairs: Vec<PropertyPair> = properties
        .iter()
        .map(|(key, value)| PropertyPair {
            key: key.clone(),
            value: display_value(value),
        })
        .collect();

    let headline = pairs
        .iter()
        .find(|pair| {
            HEADLINE_KEY
                .as_ref()
                .is_some_and(|pattern| pattern.is_match(&pair.key))
        })
        .cloned();

    PopupDescription {
        headline,
        properties: pairs,
        notice: None,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
