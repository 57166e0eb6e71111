//! Rule-based response generation.
//!
//! An ordered table of (predicate, canned response) rules is scanned
//! top-to-bottom against a lower-cased copy of the user message; the first
//! match wins. No scoring, no combination of matches. When nothing matches,
//! a clarifying question is produced, personalized from the business profile
//! when its fields are filled in.

use taxmitra_types::profile::BusinessProfile;

/// Keyword predicate over the lower-cased user message.
enum Predicate {
    /// Every keyword must be present.
    All(&'static [&'static str]),
    /// At least one keyword must be present.
    Any(&'static [&'static str]),
}

impl Predicate {
    fn matches(&self, message: &str) -> bool {
        match self {
            Predicate::All(keywords) => keywords.iter().all(|k| message.contains(k)),
            Predicate::Any(keywords) => keywords.iter().any(|k| message.contains(k)),
        }
    }
}

struct Rule {
    predicate: Predicate,
    response: &'static str,
}

pub const GST_DEADLINE_RESPONSE: &str = "GST filing deadlines depend on your business type. For normal taxpayers, GSTR-1 is due by the 11th of the following month, and GSTR-3B by the 20th. If your turnover is below ₹5 crore, you may be eligible for quarterly filing.";

pub const TAX_CALENDAR_RESPONSE: &str = "Here are your upcoming tax deadlines:\n\n• April 20: GSTR-3B filing for March\n• April 25: GST payment deadline\n• May 11: GSTR-1 filing for April\n\nWould you like me to set up reminders for these dates?";

pub const ITC_RESPONSE: &str = "Input Tax Credit (ITC) allows you to claim credit for taxes paid on purchases used for business purposes. To claim ITC, ensure you have valid tax invoices, your supplier has filed returns, and you've filed your GSTR-3B. Remember that certain items like food, beverages, and personal use items have ITC restrictions.";

pub const DEDUCTION_RESPONSE: &str = "Several deductions are available under Section 80 of the Income Tax Act. Common ones include:\n\n• 80C: Investments up to ₹1.5 lakh (PPF, ELSS, etc.)\n• 80D: Health insurance premiums\n• 80G: Charitable donations\n\nFor your business type, you might also consider deductions under Section 35AD for specified businesses.";

pub const INVOICE_RESPONSE: &str = "For GST-compliant invoices, ensure they include:\n\n• Your business name, address, and GSTIN\n• Customer details including GSTIN for B2B\n• Unique invoice number and date\n• HSN/SAC code for goods/services\n• Taxable value and GST rates\n\nWould you like me to provide an invoice template?";

pub const GREETING_RESPONSE: &str = "Hello! How can I assist you with tax-related matters today?";

/// Rules in priority order; evaluation stops at the first match.
const RULES: &[Rule] = &[
    Rule {
        predicate: Predicate::All(&["gst", "deadline"]),
        response: GST_DEADLINE_RESPONSE,
    },
    Rule {
        predicate: Predicate::Any(&["tax calendar", "upcoming deadlines"]),
        response: TAX_CALENDAR_RESPONSE,
    },
    Rule {
        predicate: Predicate::Any(&["input tax credit", "itc"]),
        response: ITC_RESPONSE,
    },
    Rule {
        predicate: Predicate::Any(&["section 80", "deduction"]),
        response: DEDUCTION_RESPONSE,
    },
    Rule {
        predicate: Predicate::Any(&["invoice"]),
        response: INVOICE_RESPONSE,
    },
    Rule {
        predicate: Predicate::Any(&["hello", "hi", "hey"]),
        response: GREETING_RESPONSE,
    },
];

/// Produce the bot reply for a user message.
///
/// Deterministic and total: always returns a non-empty string. Matching is
/// case-insensitive. Rule responses ignore the profile; only the fallback
/// clarifying question interpolates it, and omitted clauses still yield
/// grammatical output.
pub fn generate(user_message: &str, profile: &BusinessProfile) -> String {
    let lowered = user_message.to_lowercase();
    for rule in RULES {
        if rule.predicate.matches(&lowered) {
            return rule.response.to_string();
        }
    }

    let business_type = if profile.business_type.is_empty() {
        String::new()
    } else {
        format!(" As a {},", profile.business_type)
    };
    let industry = if profile.industry.is_empty() {
        String::new()
    } else {
        format!(" in the {} industry,", profile.industry)
    };

    format!(
        "Thank you for your question{business_type}{industry} I'd be happy to help. Could you provide more specific details about your tax concern so I can give you the most accurate advice?"
    )
}
