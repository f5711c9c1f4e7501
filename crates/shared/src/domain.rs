use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Home,
    Contact,
    Faq,
    Tos,
    Privacy,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::Home,
        SectionId::Contact,
        SectionId::Faq,
        SectionId::Tos,
        SectionId::Privacy,
    ];

    pub const DEFAULT: SectionId = SectionId::Home;

    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::Contact => "contact",
            SectionId::Faq => "faq",
            SectionId::Tos => "tos",
            SectionId::Privacy => "privacy",
        }
    }

    pub fn fragment(self) -> String {
        format!("#{}", self.as_str())
    }

    /// Parses a section reference such as `faq` or `#faq`.
    ///
    /// Surrounding whitespace and a single leading `#` are tolerated; the rest
    /// must be a lowercase ASCII word naming exactly one section.
    pub fn parse_target(target: &str) -> Result<Self, NavigationError> {
        let trimmed = target.trim();
        let name = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(NavigationError::Malformed(target.to_string()));
        }

        SectionId::ALL
            .into_iter()
            .find(|section| section.as_str() == name)
            .ok_or_else(|| NavigationError::UnknownSection(name.to_string()))
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_target(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub display_name: &'static str,
    pub title: String,
}

/// Closed mapping from section id to display name and document title.
#[derive(Debug, Clone)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    pub fn new(site_name: &str) -> Self {
        let sections = SectionId::ALL
            .into_iter()
            .map(|id| {
                let display_name = display_name_for(id);
                let title = if site_name.trim().is_empty() {
                    display_name.to_string()
                } else {
                    format!("{display_name} | {}", site_name.trim())
                };
                Section {
                    id,
                    display_name,
                    title,
                }
            })
            .collect();
        Self { sections }
    }

    pub fn get(&self, id: SectionId) -> &Section {
        // Built from SectionId::ALL, so every id has an entry at its own index.
        &self.sections[id as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

fn display_name_for(id: SectionId) -> &'static str {
    match id {
        SectionId::Home => "Home",
        SectionId::Contact => "Contact",
        SectionId::Faq => "FAQ",
        SectionId::Tos => "Terms of Service",
        SectionId::Privacy => "Privacy Policy",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Contact,
    Subject,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Contact,
        FormField::Subject,
        FormField::Message,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Contact => "Contact",
            FormField::Subject => "Subject",
            FormField::Message => "Message",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Contact => "contact",
            FormField::Subject => "subject",
            FormField::Message => "message",
        }
    }
}
