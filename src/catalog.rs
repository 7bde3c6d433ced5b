use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Descriptive text the host shows for a selected body, keyed by body name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InfoTable {
    entries: HashMap<String, String>,
}

impl InfoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Short facts for the default solar table.
    pub fn solar() -> Self {
        let mut table = Self::new();
        for (name, text) in SOLAR_INFO {
            table.insert(*name, *text);
        }
        table
    }

    /// Parses a JSON object of `name -> text`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(name.into(), text.into());
    }

    /// Text for `name`. Unknown names are logged and yield `None`.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        let text = self.entries.get(name).map(String::as_str);
        if text.is_none() {
            log::warn!("no information available for {}", name);
        }
        text
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const SOLAR_INFO: &[(&str, &str)] = &[
    ("Sun", "A G-type star made mostly of hydrogen and helium. Drawn to planet scale it would reach past the orbit of Saturn."),
    ("Mercury", "The innermost planet. Its surface swings between -173 and 427 °C."),
    ("Venus", "108.2 million km from the Sun. A CO2 atmosphere holds its surface near 465 °C."),
    ("Earth", "149.6 million km from the Sun, averaging 14 °C. The only known home of life."),
    ("Mars", "The red planet, 227.9 million km out. Iron oxide dust colours its surface; it averages -60 °C."),
    ("Jupiter", "The largest planet, 1,898 x 10^24 kg, banded by its gaseous atmosphere. About -145 °C."),
    ("Saturn", "About 1.43 billion km from the Sun, known for its rings. Averages -178 °C."),
    ("Uranus", "Blue-green from atmospheric methane and tilted onto its side. Around -224 °C."),
    ("Neptune", "Vivid blue with the fastest winds in the solar system. Temperatures dip to -214 °C."),
    ("Pluto", "A dwarf planet 5.9 billion km from the Sun with a heart-shaped glacier. Around -229 °C."),
];
