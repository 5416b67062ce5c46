use serde::{Deserialize, Serialize};

/// Fixed taxonomy of freelance work categories.
///
/// The variant order is the classifier's evaluation order and doubles as the
/// tie-break rule: when two categories accumulate the same keyword score, the
/// one listed first here wins. Both the rule classifier and the preference
/// matcher share this enumeration, but they match against it with different
/// logic (keyword scoring vs. substring containment) on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AiContent,
    AiChatbot,
    AiAgent,
    RagDocAi,
    AiIntegration,
    AiWebApp,
    MlModel,
    ComputerVision,
    NlpText,
    DataWork,
    Automation,
    VoiceSpeech,
    Consulting,
    PureWebDev,
    MobileApp,
    Other,
}

impl Category {
    /// All categories in evaluation (and tie-break) order.
    pub const ALL: [Category; 16] = [
        Category::AiContent,
        Category::AiChatbot,
        Category::AiAgent,
        Category::RagDocAi,
        Category::AiIntegration,
        Category::AiWebApp,
        Category::MlModel,
        Category::ComputerVision,
        Category::NlpText,
        Category::DataWork,
        Category::Automation,
        Category::VoiceSpeech,
        Category::Consulting,
        Category::PureWebDev,
        Category::MobileApp,
        Category::Other,
    ];

    /// Stable machine key, used in config documents and the database.
    pub fn key(&self) -> &'static str {
        match self {
            Category::AiContent => "ai_content",
            Category::AiChatbot => "ai_chatbot",
            Category::AiAgent => "ai_agent",
            Category::RagDocAi => "rag_doc_ai",
            Category::AiIntegration => "ai_integration",
            Category::AiWebApp => "ai_web_app",
            Category::MlModel => "ml_model",
            Category::ComputerVision => "computer_vision",
            Category::NlpText => "nlp_text",
            Category::DataWork => "data_work",
            Category::Automation => "automation",
            Category::VoiceSpeech => "voice_speech",
            Category::Consulting => "consulting",
            Category::PureWebDev => "pure_web_dev",
            Category::MobileApp => "mobile_app",
            Category::Other => "other",
        }
    }

    /// Human-readable label, as stored on job records.
    pub fn label(&self) -> &'static str {
        match self {
            Category::AiContent => "AI Content / Video / Image",
            Category::AiChatbot => "AI Chatbot / Assistant",
            Category::AiAgent => "AI Agent / Automation",
            Category::RagDocAi => "RAG / Document AI",
            Category::AiIntegration => "AI Integration (existing app)",
            Category::AiWebApp => "Build AI Web App",
            Category::MlModel => "ML / Model Development",
            Category::ComputerVision => "Computer Vision",
            Category::NlpText => "NLP / Text Processing",
            Category::DataWork => "Data Science / Analytics",
            Category::Automation => "Automation / Scraping / Workflow",
            Category::VoiceSpeech => "Voice / Speech AI",
            Category::Consulting => "Consulting / Strategy / Advisory",
            Category::PureWebDev => "Web Development (no AI)",
            Category::MobileApp => "Mobile App Development",
            Category::Other => "Other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_categories_unique_keys() {
        let mut keys: Vec<&str> = Category::ALL.iter().map(|c| c.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Category::ALL.len());
    }

    #[test]
    fn test_other_is_last() {
        assert_eq!(*Category::ALL.last().unwrap(), Category::Other);
    }
}
