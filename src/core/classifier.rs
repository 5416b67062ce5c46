use crate::core::taxonomy::Category;

/// One keyword rule: (keyword, title weight, description weight, skills weight).
///
/// The three checks are independent: a keyword found in all three texts
/// contributes all three weights.
type Rule = (&'static str, i64, i64, i64);

const AI_CONTENT_RULES: &[Rule] = &[
    ("ai video", 5, 3, 3),
    ("ai image", 4, 3, 3),
    ("ai art", 4, 3, 2),
    ("midjourney", 5, 4, 5),
    ("dall-e", 5, 4, 5),
    ("dalle", 5, 4, 5),
    ("stable diffusion", 5, 4, 5),
    ("sora", 5, 4, 5),
    ("runway", 4, 3, 4),
    ("heygen", 5, 4, 5),
    ("synthesia", 5, 4, 5),
    ("ai generat", 3, 2, 2),
    ("video generat", 5, 3, 3),
    ("image generat", 4, 3, 3),
    ("ai avatar", 4, 3, 3),
    ("text to video", 5, 3, 3),
    ("text to image", 4, 3, 3),
    ("ai edit", 3, 2, 2),
    ("video production", 2, 1, 2),
    ("video edit", 2, 1, 2),
    ("content creat", 2, 1, 1),
    ("ugc", 3, 2, 1),
    ("capcut", 4, 3, 4),
    ("colossyan", 5, 4, 5),
];

const AI_CHATBOT_RULES: &[Rule] = &[
    ("chatbot", 6, 4, 5),
    ("chat bot", 6, 4, 5),
    ("ai chat", 5, 3, 3),
    ("virtual assistant", 5, 3, 3),
    ("conversational ai", 6, 4, 5),
    ("conversational", 3, 2, 2),
    ("customer support ai", 5, 4, 3),
    ("support bot", 5, 3, 3),
    ("ai assistant", 4, 3, 3),
    ("voiceflow", 5, 4, 5),
    ("dialogflow", 5, 4, 5),
    ("botpress", 5, 4, 5),
    ("chatgpt", 2, 1, 2),
    ("intercom", 3, 2, 3),
];

const AI_AGENT_RULES: &[Rule] = &[
    ("ai agent", 6, 4, 5),
    ("ai agents", 6, 4, 5),
    ("autonomous agent", 6, 4, 4),
    ("multi-agent", 6, 4, 4),
    ("multi agent", 6, 4, 4),
    ("agent framework", 5, 3, 4),
    ("crewai", 6, 5, 6),
    ("autogen", 6, 5, 6),
    ("langgraph", 6, 5, 6),
    ("ai workflow", 5, 3, 3),
    ("agentic", 5, 4, 4),
    ("tool calling", 4, 3, 3),
    ("function calling", 3, 2, 2),
    ("bdr agent", 5, 4, 3),
    ("sales agent", 4, 3, 2),
    ("ai sdr", 5, 4, 3),
];

const RAG_DOC_AI_RULES: &[Rule] = &[
    ("rag", 5, 4, 5),
    ("retrieval augmented", 6, 5, 5),
    ("knowledge base", 5, 4, 3),
    ("document ai", 5, 4, 4),
    ("document processing", 4, 3, 3),
    ("pdf extract", 4, 3, 3),
    ("document extract", 4, 3, 3),
    ("vector database", 5, 4, 5),
    ("vector store", 5, 4, 5),
    ("pinecone", 5, 4, 5),
    ("chromadb", 5, 4, 5),
    ("weaviate", 5, 4, 5),
    ("qdrant", 5, 4, 5),
    ("embedding", 3, 2, 3),
    ("semantic search", 5, 4, 4),
    ("knowledge graph", 4, 3, 3),
    ("document q&a", 5, 4, 3),
    ("data room", 4, 3, 2),
    ("read file", 3, 2, 1),
    ("answer question", 3, 2, 1),
];

const AI_INTEGRATION_RULES: &[Rule] = &[
    ("ai integration", 5, 4, 4),
    ("integrate ai", 5, 4, 3),
    ("integrate openai", 5, 4, 3),
    ("integrate claude", 5, 4, 3),
    ("integrate gpt", 5, 4, 3),
    ("add ai", 4, 3, 2),
    ("api integration", 3, 2, 3),
    ("openai api", 3, 2, 2),
    ("connect ai", 4, 3, 2),
    ("existing app", 3, 2, 1),
    ("existing site", 3, 2, 1),
    ("existing website", 3, 2, 1),
    ("wordpress", 2, 1, 2),
    ("shopify", 2, 1, 2),
    ("plugin", 2, 1, 1),
];

const AI_WEB_APP_RULES: &[Rule] = &[
    ("saas", 5, 3, 4),
    ("mvp", 5, 3, 3),
    ("web app", 4, 2, 3),
    ("web application", 4, 2, 3),
    ("full stack", 3, 2, 3),
    ("full-stack", 3, 2, 3),
    ("platform", 2, 1, 1),
    ("dashboard", 3, 2, 2),
    ("prototype", 3, 2, 2),
    ("startup", 2, 1, 1),
    ("build a", 2, 1, 0),
    ("develop a", 2, 1, 0),
    ("create a", 2, 1, 0),
    ("ai-powered", 3, 2, 2),
    ("ai powered", 3, 2, 2),
    ("react", 2, 1, 3),
    ("next.js", 2, 1, 3),
    ("node.js", 1, 0, 2),
    ("django", 1, 0, 2),
    ("fastapi", 1, 0, 2),
];

const ML_MODEL_RULES: &[Rule] = &[
    ("fine-tun", 5, 4, 5),
    ("fine tun", 5, 4, 5),
    ("model training", 6, 4, 5),
    ("train a model", 5, 4, 3),
    ("train model", 5, 4, 3),
    ("custom model", 5, 3, 3),
    ("machine learning model", 5, 4, 4),
    ("deep learning", 4, 3, 4),
    ("neural network", 4, 3, 4),
    ("tensorflow", 3, 2, 4),
    ("pytorch", 3, 2, 4),
    ("scikit", 3, 2, 4),
    ("sklearn", 3, 2, 4),
    ("predictive model", 5, 3, 3),
    ("classification model", 5, 3, 3),
    ("regression model", 5, 3, 3),
    ("recommendation system", 5, 3, 3),
    ("recommendation engine", 5, 3, 3),
    ("mlops", 5, 4, 5),
    ("model deploy", 4, 3, 3),
    ("hugging face", 4, 3, 5),
    ("transformer", 3, 2, 3),
];

const COMPUTER_VISION_RULES: &[Rule] = &[
    ("computer vision", 6, 5, 6),
    ("image recognition", 5, 4, 4),
    ("image detection", 5, 4, 4),
    ("object detection", 6, 5, 5),
    ("opencv", 5, 4, 6),
    ("image classification", 5, 4, 4),
    ("face detection", 5, 4, 4),
    ("face recognition", 5, 4, 4),
    ("ocr", 5, 4, 4),
    ("yolo", 5, 4, 5),
    ("image segmentation", 5, 4, 4),
    ("video analysis", 4, 3, 3),
    ("image process", 4, 3, 3),
];

const NLP_TEXT_RULES: &[Rule] = &[
    ("nlp", 4, 3, 5),
    ("natural language processing", 5, 4, 5),
    ("sentiment analysis", 6, 5, 5),
    ("text classification", 5, 4, 4),
    ("text mining", 5, 4, 4),
    ("named entity", 5, 4, 4),
    ("entity extraction", 5, 4, 4),
    ("text extract", 4, 3, 3),
    ("summariz", 3, 2, 2),
    ("translation", 3, 2, 2),
    ("topic model", 4, 3, 3),
    ("text analys", 4, 3, 3),
    ("spacy", 5, 4, 5),
    ("nltk", 5, 4, 5),
];

const DATA_WORK_RULES: &[Rule] = &[
    ("data scien", 4, 3, 4),
    ("data analy", 5, 3, 4),
    ("data engineer", 5, 3, 4),
    ("data pipeline", 5, 4, 4),
    ("etl", 4, 3, 4),
    ("data visualiz", 4, 3, 3),
    ("business intelligence", 4, 3, 3),
    ("bi dashboard", 4, 3, 3),
    ("power bi", 4, 3, 5),
    ("tableau", 4, 3, 5),
    ("data warehouse", 4, 3, 4),
    ("data migration", 4, 3, 3),
    ("database design", 3, 2, 3),
    ("analytics", 3, 2, 2),
    ("reporting", 2, 1, 1),
    ("big data", 3, 2, 3),
    ("airflow", 4, 3, 5),
    ("spark", 3, 2, 4),
    ("pandas", 2, 1, 3),
];

const AUTOMATION_RULES: &[Rule] = &[
    ("automat", 3, 2, 2),
    ("web scraping", 6, 4, 5),
    ("web scrap", 6, 4, 5),
    ("scraper", 5, 4, 4),
    ("scraping", 4, 3, 3),
    ("zapier", 5, 4, 5),
    ("make.com", 5, 4, 5),
    ("n8n", 5, 4, 5),
    ("workflow automat", 5, 4, 4),
    ("process automat", 4, 3, 3),
    ("rpa", 5, 4, 5),
    ("selenium", 4, 3, 5),
    ("puppeteer", 4, 3, 5),
    ("email automat", 4, 3, 3),
    ("bot", 3, 2, 1),
    ("cron", 3, 2, 2),
];

const VOICE_SPEECH_RULES: &[Rule] = &[
    ("voice ai", 6, 4, 5),
    ("speech to text", 6, 5, 5),
    ("text to speech", 6, 5, 5),
    ("stt", 3, 2, 3),
    ("tts", 3, 2, 3),
    ("voice assistant", 5, 4, 4),
    ("voice clone", 5, 4, 4),
    ("voice agent", 5, 4, 4),
    ("elevenlabs", 5, 4, 5),
    ("whisper", 4, 3, 4),
    ("vapi", 5, 4, 5),
    ("twilio", 3, 2, 3),
    ("ivr", 4, 3, 3),
    ("telephony", 3, 2, 2),
    ("call center", 3, 2, 2),
];

const CONSULTING_RULES: &[Rule] = &[
    ("consult", 4, 3, 3),
    ("advisor", 4, 3, 3),
    ("advisory", 4, 3, 3),
    ("strategy", 3, 2, 2),
    ("roadmap", 3, 2, 2),
    ("architect", 3, 2, 2),
    ("review", 2, 1, 1),
    ("audit", 3, 2, 2),
    ("mentor", 3, 2, 2),
    ("teach", 2, 1, 1),
    ("train team", 3, 2, 2),
    ("feasibility", 4, 3, 3),
    ("assessment", 3, 2, 2),
    ("proof of concept", 3, 2, 2),
];

const PURE_WEB_DEV_RULES: &[Rule] = &[
    ("web develop", 3, 2, 3),
    ("website", 3, 2, 2),
    ("frontend", 3, 2, 3),
    ("backend", 2, 1, 2),
    ("landing page", 4, 3, 3),
    ("e-commerce", 3, 2, 3),
    ("ecommerce", 3, 2, 3),
    ("shopify", 3, 2, 4),
    ("wordpress", 3, 2, 4),
    ("woocommerce", 3, 2, 4),
    ("html", 1, 0, 2),
    ("css", 1, 0, 2),
    ("php", 2, 1, 3),
    ("laravel", 3, 2, 4),
];

const MOBILE_APP_RULES: &[Rule] = &[
    ("mobile app", 5, 4, 4),
    ("ios app", 5, 4, 4),
    ("android app", 5, 4, 4),
    ("react native", 5, 4, 5),
    ("flutter", 5, 4, 5),
    ("swift", 3, 2, 4),
    ("kotlin", 3, 2, 4),
    ("mobile develop", 4, 3, 4),
];

/// Rule tables in evaluation order. `Other` has no rules and only wins by
/// default when nothing else scores.
fn rules_for(category: Category) -> &'static [Rule] {
    match category {
        Category::AiContent => AI_CONTENT_RULES,
        Category::AiChatbot => AI_CHATBOT_RULES,
        Category::AiAgent => AI_AGENT_RULES,
        Category::RagDocAi => RAG_DOC_AI_RULES,
        Category::AiIntegration => AI_INTEGRATION_RULES,
        Category::AiWebApp => AI_WEB_APP_RULES,
        Category::MlModel => ML_MODEL_RULES,
        Category::ComputerVision => COMPUTER_VISION_RULES,
        Category::NlpText => NLP_TEXT_RULES,
        Category::DataWork => DATA_WORK_RULES,
        Category::Automation => AUTOMATION_RULES,
        Category::VoiceSpeech => VOICE_SPEECH_RULES,
        Category::Consulting => CONSULTING_RULES,
        Category::PureWebDev => PURE_WEB_DEV_RULES,
        Category::MobileApp => MOBILE_APP_RULES,
        Category::Other => &[],
    }
}

const AI_SIGNALS: &[&str] = &[
    "ai",
    "artificial intelligence",
    "gpt",
    "openai",
    "llm",
    "machine learning",
];

const WEB_SIGNALS: &[&str] = &[
    "react",
    "next.js",
    "node",
    "web app",
    "saas",
    "full stack",
    "full-stack",
    "frontend",
    "backend",
];

/// Minimum winning score; anything below is classified as `Other`.
const MIN_SCORE: i64 = 4;

/// Classify a job into exactly one category with a confidence in [0.3, 1.0].
///
/// Deterministic weighted keyword matching over the lowercased title,
/// description, and space-joined skills. No ML, no network calls; used as the
/// cheap baseline when LLM classification is unavailable.
pub fn classify_job(title: &str, description: &str, skills: &[String]) -> (Category, f64) {
    let title = title.to_lowercase();
    let desc = description.to_lowercase();
    let skills_text = skills
        .iter()
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let all_text = format!("{} {} {}", title, desc, skills_text);

    let mut scores = [0i64; Category::ALL.len()];
    for category in Category::ALL {
        let total = &mut scores[category as usize];
        for &(keyword, tw, dw, sw) in rules_for(category) {
            if title.contains(keyword) {
                *total += tw;
            }
            if desc.contains(keyword) {
                *total += dw;
            }
            if skills_text.contains(keyword) {
                *total += sw;
            }
        }
    }

    // Combined-signal adjustments, after independent rule scoring.
    let has_ai_signal = AI_SIGNALS.iter().any(|kw| all_text.contains(kw));
    let has_web_signal = WEB_SIGNALS.iter().any(|kw| all_text.contains(kw));
    if has_ai_signal && has_web_signal {
        scores[Category::AiWebApp as usize] += 4;
    }
    if has_ai_signal {
        let idx = Category::PureWebDev as usize;
        scores[idx] = (scores[idx] - 8).max(0);
    }

    // First category in taxonomy order to reach the maximum wins.
    let mut winner = Category::Other;
    let mut top = i64::MIN;
    for category in Category::ALL {
        let score = scores[category as usize];
        if score > top {
            winner = category;
            top = score;
        }
    }

    if top < MIN_SCORE {
        return (Category::Other, 0.3);
    }

    let second = Category::ALL
        .iter()
        .filter(|c| **c != winner)
        .map(|c| scores[*c as usize])
        .max()
        .unwrap_or(0);

    // Confidence grows with the winner's lead over the runner-up and with the
    // winner's absolute score.
    let gap = (top - second) as f64;
    let confidence = (0.4 + gap * 0.05 + top as f64 * 0.02).clamp(0.3, 1.0);
    let confidence = (confidence * 100.0).round() / 100.0;

    (winner, confidence)
}
