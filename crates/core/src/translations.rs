//! User-facing strings for the story client, keyed by language.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Interface language of the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Mr,
}

/// Every string the client shows, for one language.
#[derive(Debug)]
pub struct Translations {
    pub app_title: &'static str,
    pub app_subtitle: &'static str,
    pub main_title: &'static str,
    pub main_subtitle: &'static str,
    pub placeholder: &'static str,
    pub generate_btn: &'static str,
    pub regenerate_btn: &'static str,
    pub download_btn: &'static str,
    pub generating: &'static str,
    pub suggestions_title: &'static str,
    pub suggestions: [&'static str; 4],
    pub your_story: &'static str,
    pub copy_story: &'static str,
    pub download_pdf: &'static str,
    pub story_images: &'static str,
    pub generating_story: &'static str,
    pub generating_images: &'static str,
    pub please_wait: &'static str,
    pub enter_prompt: &'static str,
    pub story_error: &'static str,
    pub image_error: &'static str,
    pub pdf_error: &'static str,
    pub zoom_in: &'static str,
    pub download_image: &'static str,
}

static EN: Translations = Translations {
    app_title: "Marathi AI Story Generator",
    app_subtitle: "Create magical stories with beautiful visuals",
    main_title: "Share Your Imagination",
    main_subtitle: "Write any idea, character, or situation and see a beautiful Marathi story come to life!",
    placeholder: "e.g., A story of a brave girl who saved her village...",
    generate_btn: "Generate Story",
    regenerate_btn: "New Story",
    download_btn: "Download PDF",
    generating: "Generating story...",
    suggestions_title: "Some suggestions:",
    suggestions: [
        "A wise girl's story",
        "Adventure in magical forest",
        "A farmer's struggle",
        "Tale of friendship",
    ],
    your_story: "Your Story",
    copy_story: "Copy story",
    download_pdf: "Download PDF",
    story_images: "Story Images",
    generating_story: "Generating story...",
    generating_images: "Generating images...",
    please_wait: "Please wait...",
    enter_prompt: "Please enter a story idea",
    story_error: "Error generating story. Please try again.",
    image_error: "Error generating images.",
    pdf_error: "Error creating PDF.",
    zoom_in: "Zoom In",
    download_image: "Download Image",
};

static MR: Translations = Translations {
    app_title: "मराठी AI कथा जनरेटर",
    app_subtitle: "जादुई कथा आणि सुंदर चित्रे तयार करा",
    main_title: "तुमची कल्पना सांगा",
    main_subtitle: "कोणतीही कल्पना, पात्र किंवा परिस्थिती लिहा आणि एक सुंदर मराठी कथा पहा!",
    placeholder: "उदा: एका लहान मुलीने तिच्या गावाला वाचवलेली गोष्ट...",
    generate_btn: "कथा तयार करा",
    regenerate_btn: "नवीन कथा",
    download_btn: "PDF डाउनलोड",
    generating: "कथा तयार करत आहे...",
    suggestions_title: "काही सूचना:",
    suggestions: [
        "एका शहाण्या मुलीची कहाणी",
        "जादुई वनात साहस",
        "एका शेतकऱ्याचा संघर्ष",
        "मित्रत्वाची कथा",
    ],
    your_story: "तुमची कथा",
    copy_story: "कथा कॉपी करा",
    download_pdf: "PDF डाउनलोड करा",
    story_images: "कथेची चित्रे",
    generating_story: "कथा तयार करत आहे...",
    generating_images: "चित्रे तयार करत आहे...",
    please_wait: "कृपया थांबा...",
    enter_prompt: "कृपया कथेसाठी कल्पना लिहा",
    story_error: "कथा तयार करताना अडचण आली. कृपया पुन्हा प्रयत्न करा.",
    image_error: "चित्रे तयार करताना अडचण आली.",
    pdf_error: "PDF तयार करताना अडचण आली.",
    zoom_in: "मोठे करा",
    download_image: "चित्र डाउनलोड करा",
};

impl Language {
    pub fn translations(self) -> &'static Translations {
        match self {
            Language::En => &EN,
            Language::Mr => &MR,
        }
    }

    /// Switch between English and Marathi.
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Mr,
            Language::Mr => Language::En,
        }
    }

    /// Window/document title for this language.
    pub fn document_title(self) -> &'static str {
        match self {
            Language::Mr => "मराठी कथा जनरेटर | AI Story Generator",
            Language::En => "Marathi Story Generator | AI Story Generator",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Mr => "mr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "mr" => Ok(Language::Mr),
            other => Err(CoreError::Validation(format!(
                "Unsupported language '{other}' (expected 'en' or 'mr')"
            ))),
        }
    }
}
