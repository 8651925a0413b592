//! Canned replies for free-text questions

/// Turns a user message into a reply
pub trait TextResponder: Send + Sync {
    fn generate(&self, text: &str) -> String;
}

const FALLBACK: &str = "I'm here to help with your financial questions! Feel free to ask about budgeting, saving, investing, or any other financial topics.";

/// First-match keyword rules, checked in order against the lower-cased message
#[derive(Debug, Clone)]
pub struct KeywordResponder {
    rules: Vec<(String, String)>,
    fallback: String,
}

impl KeywordResponder {
    pub fn new(rules: Vec<(String, String)>, fallback: impl Into<String>) -> Self {
        let rules = rules.into_iter().map(|(k, r)| (k.to_lowercase(), r)).collect();
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    pub fn standard() -> Self {
        let rules = [
            ("budget", "I recommend creating a 50/30/20 budget: 50% for needs, 30% for wants, and 20% for savings and debt repayment."),
            ("savings", "Start with an emergency fund of 3-6 months of expenses, then focus on retirement savings and other financial goals."),
            ("investment", "Consider diversifying your investments across stocks, bonds, and other assets. Start with low-cost index funds."),
            ("debt", "Focus on paying off high-interest debt first, then work on building an emergency fund."),
            ("retirement", "Aim to save 15-20% of your income for retirement. Take advantage of employer 401(k) matching if available."),
        ];
        Self::new(
            rules.iter().map(|&(k, r)| (k.to_string(), r.to_string())).collect(),
            FALLBACK,
        )
    }
}

impl Default for KeywordResponder {
    fn default() -> Self {
        Self::standard()
    }
}

impl TextResponder for KeywordResponder {
    fn generate(&self, text: &str) -> String {
        let text = text.to_lowercase();
        self.rules
            .iter()
            .find(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}
