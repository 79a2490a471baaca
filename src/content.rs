//! Static panel content: home summary, news, about and knowledge text.

/// A linked news headline on the home panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsItem {
    pub title: &'static str,
    pub url: &'static str,
}

/// Column/value pairs of the sample "last checkup" shown on the home panel.
pub const LAST_CHECKUP: [(&str, &str); 6] = [
    ("Date", "2025-09-15"),
    ("Diabetes Risk", "Moderate"),
    ("Probability", "0.62"),
    ("HbA1c Level", "6.1"),
    ("Glucose", "145"),
    ("BMI", "28.5"),
];

pub const NEWS_ITEMS: [NewsItem; 3] = [
    NewsItem {
        title: "India launches largest-ever health outreach for women & children",
        url: "https://health.economictimes.indiatimes.com/news/policy/pm-launches-largest-ever-health-scheme-for-women-and-children/123966618",
    },
    NewsItem {
        title: "Digital health revolution bridges rural–urban divide",
        url: "https://health.economictimes.indiatimes.com/news/industry/transforming-rural-healthcare-in-india-a-digital-and-ai-driven-revolution/123898005",
    },
    NewsItem {
        title: "H3N2 virus outbreak hits Delhi-NCR, hospitals report surge",
        url: "https://www.msn.com/en-in/health/health-news/delhi-ncr-health-news-live-updates-h3n2-virus-hits-india-doctors-alert-hospitals-report-massive-surge-in-cases/ar-AA1MMtt9",
    },
];

pub const HOME_HINT: &str = "Use the sidebar to explore predictions, appointments, and more.";

pub const PROFILE_NOTE: &str =
    "You can use this section to store your basic info for future appointments or reports.";

pub const ABOUT_US: [&str; 3] = [
    "Welcome to the Diabetes Prediction App!",
    "Our mission is to empower individuals with early detection tools and reliable health insights.",
    "This app was built using machine learning to help users assess their risk of diabetes based on clinical inputs.",
];

/// A titled section of the knowledge panel.
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeSection {
    pub heading: &'static str,
    pub intro: Option<&'static str>,
    pub bullets: &'static [&'static str],
}

pub const KNOWLEDGE: [KnowledgeSection; 3] = [
    KnowledgeSection {
        heading: "What is Diabetes?",
        intro: Some(
            "Diabetes is a chronic condition that affects how your body turns food into energy. \
             There are three main types:",
        ),
        bullets: &[
            "Type 1 Diabetes: Autoimmune condition where the body attacks insulin-producing cells.",
            "Type 2 Diabetes: Body becomes resistant to insulin or doesn’t produce enough.",
            "Gestational Diabetes: Occurs during pregnancy and usually resolves after birth.",
        ],
    },
    KnowledgeSection {
        heading: "Common Symptoms",
        intro: None,
        bullets: &[
            "Frequent urination",
            "Increased thirst",
            "Fatigue",
            "Blurred vision",
            "Slow healing wounds",
        ],
    },
    KnowledgeSection {
        heading: "Prevention Tips",
        intro: None,
        bullets: &[
            "Maintain a healthy weight",
            "Exercise regularly",
            "Eat a balanced diet",
            "Avoid smoking and excessive alcohol",
            "Monitor blood sugar levels",
        ],
    },
];
