//! Assistant personas and their system prompts.
//!
//! Each chat message is routed to one persona. The persona decides the
//! system prompt handed to the language model; the planner persona is the
//! one that consumes schedule data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleItem;

/// Prompt used when no persona matches.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are an AI senior student who helps with life on the Songdo campus. Answer kindly.";

/// An assistant persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    General,
    Planner,
    Menu,
    Email,
    Idea,
    Local,
}

impl Persona {
    /// Personas offered in the picker, in display order.
    pub const PICKER: [Persona; 5] = [
        Persona::General,
        Persona::Planner,
        Persona::Menu,
        Persona::Email,
        Persona::Idea,
    ];

    /// Stable identifier used for routing.
    pub fn id(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Planner => "planner",
            Self::Menu => "menu",
            Self::Email => "email",
            Self::Idea => "idea",
            Self::Local => "local",
        }
    }

    /// Display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::General => "Yonsei-Navi",
            Self::Planner => "J-type TA",
            Self::Menu => "Foodie",
            Self::Email => "Etiquette Tutor",
            Self::Idea => "Idea Bank",
            Self::Local => "Songdo Veteran",
        }
    }

    /// Short role label.
    pub fn role(&self) -> &'static str {
        match self {
            Self::General => "main assistant",
            Self::Planner => "schedule / assignments",
            Self::Menu => "cafeteria / restaurants",
            Self::Email => "email drafting",
            Self::Idea => "assignments / team projects",
            Self::Local => "campus tips",
        }
    }

    /// One-line description shown in the picker.
    pub fn description(&self) -> &'static str {
        match self {
            Self::General => "Ask me anything!",
            Self::Planner => "Analyzes your schedule from the calendar export.",
            Self::Menu => "Today's cafeteria menu and Songdo restaurant picks.",
            Self::Email => "Drafts emails to your professors.",
            Self::Idea => "Finds topics and outlines for stuck assignments.",
            Self::Local => "Knows every corner of the international campus.",
        }
    }

    /// System prompt for the language model.
    ///
    /// Personas without a dedicated prompt use [`DEFAULT_SYSTEM_PROMPT`].
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Self::Planner => PLANNER_PROMPT,
            Self::Menu => MENU_PROMPT,
            Self::Email => EMAIL_PROMPT,
            Self::Local => LOCAL_PROMPT,
            Self::General | Self::Idea => DEFAULT_SYSTEM_PROMPT,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error for an unrecognized persona id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown persona: {0}")]
pub struct UnknownPersona(pub String);

impl FromStr for Persona {
    type Err = UnknownPersona;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "planner" => Ok(Self::Planner),
            "menu" => Ok(Self::Menu),
            "email" => Ok(Self::Email),
            "idea" => Ok(Self::Idea),
            "local" => Ok(Self::Local),
            other => Err(UnknownPersona(other.to_string())),
        }
    }
}

/// Resolves the system prompt for an optional persona id.
pub fn system_prompt_for(id: Option<&str>) -> &'static str {
    id.and_then(|id| id.parse::<Persona>().ok())
        .map_or(DEFAULT_SYSTEM_PROMPT, |p| p.system_prompt())
}

/// Builds the planner message carrying confirmed schedule items.
pub fn planner_context(items: &[ScheduleItem]) -> Result<String, serde_json::Error> {
    let data = serde_json::to_string(items)?;
    Ok(format!(
        "[System: schedule data loaded] Analyze the course codes and due dates and build a study plan.\nData: {data}"
    ))
}

const PLANNER_PROMPT: &str = "\
You are the 'J-type TA', a meticulous and strict teaching assistant who turns a student's schedule data into a study plan.
[Role]
1. Analyze the JSON schedule data the student provides.
2. Rank items by how close their due date (date) is.
3. Use the course code prefix to tell majors from general education (CSI/EEE: major, YCE: required general education).
4. Give concrete instructions such as \"Finish the physics set during Tuesday's free period!\".
5. Speak in a formal, professional teaching-assistant tone.";

const MENU_PROMPT: &str = "\
You are the 'Foodie', a gourmet friend who knows every Songdo restaurant and cafeteria menu.
React to the menu the student shows you (\"Wow, bulgogi for lunch today!\"), and when it looks weak
recommend places near campus (Campus Town, Triple Street). Keep the tone upbeat and recommend today's menu.";

const EMAIL_PROMPT: &str = "\
You are the 'Etiquette Tutor', a courteous assistant who writes emails to professors on the student's behalf.
Given the situation, write a complete email with [Subject], [Body] and [Closing].
Always use the most formal honorifics and flawless grammar and spacing.";

const LOCAL_PROMPT: &str = "\
You are the 'Songdo Veteran', a legendary returning student who knows the geography, rules and tips of the international campus.
[Guidelines]
1. Prefer the campus data you are given when answering.
2. If something is not in the data, say honestly that you don't know. Never make things up.
3. Speak in a relaxed, friendly senior-student tone.";
