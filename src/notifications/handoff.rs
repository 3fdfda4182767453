use crate::constants::{FIRM_NAME, HANDOFF_BASE_URL};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::format_utils::format_inr;

/// Strips everything but digits from a phone number. The chat service
/// addresses numbers as bare digits with country code, no `+` or spaces.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Builds a click-to-chat deep link: `https://wa.me/<digits>?text=<encoded>`.
/// Fails when the phone number holds no digits at all.
pub fn build_handoff_uri(phone: &str, text: &str) -> Result<String> {
    let digits = normalize_phone(phone);
    if digits.is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Handoff phone number contains no digits".to_string(),
        )));
    }
    Ok(format!(
        "{}/{}?text={}",
        HANDOFF_BASE_URL,
        digits,
        urlencoding::encode(text)
    ))
}

/// Message a client sends to the operator after registering interest.
pub fn client_interest_message(
    client_name: &str,
    client_email: &str,
    client_phone: &str,
    company_name: &str,
    min_invest: i64,
) -> String {
    let contact = if client_phone.trim().is_empty() {
        "see app"
    } else {
        client_phone
    };
    format!(
        "Hello {firm}!\n\nI'm *{name}* ({email}).\nInterested in *{company}*.\nMin: {min}\nContact: {contact}\n\n– {firm} App",
        firm = FIRM_NAME,
        name = client_name,
        email = client_email,
        company = company_name,
        min = format_inr(min_invest),
        contact = contact,
    )
}

/// Operator's follow-up on an interest notification.
pub fn operator_reply_message(client_name: &str, company_name: &str) -> String {
    format!(
        "Hello {name}! 👋\n\nThis is Team {firm}. We received your interest in *{company}*.\n\nLet's connect to discuss the investment details!\n\n– {firm}",
        name = client_name,
        firm = FIRM_NAME,
        company = company_name,
    )
}

/// Operator's cold greeting from the client directory.
pub fn operator_greeting_message(client_name: &str) -> String {
    format!(
        "Hello {name}! 👋 Team {firm} here. Let's connect! – {firm}",
        name = client_name,
        firm = FIRM_NAME,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_normalization_strips_everything_but_digits() {
        assert_eq!(normalize_phone("+91 98765-43210"), "919876543210");
        assert_eq!(normalize_phone("(91) 98 76"), "919876");
        assert_eq!(normalize_phone("no digits"), "");
    }

    #[test]
    fn handoff_uri_encodes_the_text() {
        let uri = build_handoff_uri("+91 9876543210", "Hello & welcome!").unwrap();
        assert_eq!(
            uri,
            "https://wa.me/919876543210?text=Hello%20%26%20welcome%21"
        );
    }

    #[test]
    fn handoff_uri_rejects_digitless_numbers() {
        assert!(build_handoff_uri("   ", "hi").is_err());
        assert!(build_handoff_uri("+-()", "hi").is_err());
    }

    #[test]
    fn interest_message_carries_formatted_minimum() {
        let msg = client_interest_message(
            "Asha Rao",
            "asha.rao@finvest.app",
            "919876543210",
            "Meridian Logistics Pvt Ltd",
            5_000_000,
        );
        assert!(msg.contains("*Asha Rao*"));
        assert!(msg.contains("*Meridian Logistics Pvt Ltd*"));
        assert!(msg.contains("Min: ₹50,00,000"));
        assert!(msg.contains("Contact: 919876543210"));
    }

    #[test]
    fn reply_and_greeting_templates_name_the_firm() {
        let reply = operator_reply_message("Asha Rao", "Meridian Logistics Pvt Ltd");
        assert!(reply.contains("Team Finvest"));
        assert!(reply.contains("*Meridian Logistics Pvt Ltd*"));

        let greeting = operator_greeting_message("Asha Rao");
        assert_eq!(greeting, "Hello Asha Rao! 👋 Team Finvest here. Let's connect! – Finvest");
    }

    #[test]
    fn interest_message_falls_back_when_phone_is_blank() {
        let msg = client_interest_message("Asha Rao", "a@b.c", "  ", "Co", 100);
        assert!(msg.contains("Contact: see app"));
    }
}
