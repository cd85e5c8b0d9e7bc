//! Outgoing message composition: the default template and the deterministic
//! token substitution fallback.
//!
//! Both paths are total functions over whatever personalization data is
//! available. A send must never fail because the contact or job lookup came
//! back incomplete, so every missing value degrades to a generic placeholder
//! (default template) or an empty string (token substitution).

use relata_core::{defaults, Contact, JobOpportunity};

/// Substitution tokens recognized in template bodies.
const TOKEN_CONTACT_NAME: &str = "[Contact Name]";
const TOKEN_CONTACT_COMPANY: &str = "[Contact Company]";
const TOKEN_JOB_TITLE: &str = "[Job Title]";
const TOKEN_JOB_COMPANY: &str = "[Job Company]";
const TOKEN_YOUR_NAME: &str = "[Your Name]";
const TOKEN_SKILL_PROJECT: &str = "[Specific Skill/Project]";

/// Build the default outreach message for a (contact, job) pair.
///
/// Placeholders fall back to generic text when the referenced field is
/// absent or blank.
pub fn default_message(contact: Option<&Contact>, job: Option<&JobOpportunity>) -> String {
    let contact_name = contact
        .map(|c| c.name.trim())
        .filter(|n| !n.is_empty())
        .unwrap_or(defaults::FALLBACK_CONTACT_NAME);
    let job_title = job
        .map(|j| j.title.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(defaults::FALLBACK_JOB_TITLE);
    let job_company = job
        .map(|j| j.company.trim())
        .filter(|c| !c.is_empty())
        .unwrap_or(defaults::FALLBACK_JOB_COMPANY);

    format!(
        "Hi {contact_name},\n\n\
         I hope you're doing well. I'm currently applying for the {job_title} role at {job_company}\n\
         and would really appreciate a referral or any insights you can share. I'm happy to send\n\
         along my resume or any context that would be helpful.\n\n\
         Thanks so much!"
    )
}

/// Substitute known tokens in a template body.
///
/// Tokens with no known value are replaced with an empty string rather than
/// leaving the literal bracket text in the outgoing message. Deterministic
/// and never fails.
pub fn substitute_tokens(
    body: &str,
    contact: Option<&Contact>,
    job: Option<&JobOpportunity>,
    sender_name: Option<&str>,
) -> String {
    let contact_name = contact.map(|c| c.name.as_str()).unwrap_or("");
    let contact_company = contact
        .and_then(|c| c.company.as_deref())
        .unwrap_or("");
    let job_title = job.map(|j| j.title.as_str()).unwrap_or("");
    let job_company = job.map(|j| j.company.as_str()).unwrap_or("");
    let sender = sender_name.unwrap_or("");

    body.replace(TOKEN_CONTACT_NAME, contact_name)
        .replace(TOKEN_CONTACT_COMPANY, contact_company)
        .replace(TOKEN_JOB_TITLE, job_title)
        .replace(TOKEN_JOB_COMPANY, job_company)
        .replace(TOKEN_YOUR_NAME, sender)
        .replace(TOKEN_SKILL_PROJECT, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn contact(name: &str, company: Option<&str>) -> Contact {
        Contact {
            id: Uuid::new_v4(),
            name: name.to_string(),
            company: company.map(String::from),
            industry: None,
            email: None,
        }
    }

    fn job(title: &str, company: &str) -> JobOpportunity {
        JobOpportunity {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: company.to_string(),
            location: None,
            industry: None,
            archived: false,
        }
    }

    #[test]
    fn test_default_message_fully_personalized() {
        let c = contact("Dana Ito", None);
        let j = job("Staff Engineer", "Initech");
        let msg = default_message(Some(&c), Some(&j));
        assert!(msg.starts_with("Hi Dana Ito,"));
        assert!(msg.contains("the Staff Engineer role at Initech"));
        assert!(msg.ends_with("Thanks so much!"));
    }

    #[test]
    fn test_default_message_generic_fallbacks() {
        let msg = default_message(None, None);
        assert!(msg.starts_with("Hi there,"));
        assert!(msg.contains("applying for the the role role at the company"));
    }

    #[test]
    fn test_default_message_blank_name_falls_back() {
        let c = contact("   ", None);
        let msg = default_message(Some(&c), None);
        assert!(msg.starts_with("Hi there,"));
    }

    #[test]
    fn test_substitute_all_known_tokens() {
        let c = contact("Dana Ito", Some("Globex"));
        let j = job("Analyst", "Acme");
        let body =
            "Dear [Contact Name] at [Contact Company], re: [Job Title] @ [Job Company]. - [Your Name]";
        let out = substitute_tokens(body, Some(&c), Some(&j), Some("Riley"));
        assert_eq!(out, "Dear Dana Ito at Globex, re: Analyst @ Acme. - Riley");
    }

    #[test]
    fn test_substitute_unknown_tokens_left_blank() {
        let body = "Hi [Contact Name], I loved [Specific Skill/Project]. - [Your Name]";
        let out = substitute_tokens(body, None, None, None);
        assert_eq!(out, "Hi , I loved . - ");
        assert!(!out.contains('['));
    }

    #[test]
    fn test_substitute_is_deterministic() {
        let c = contact("Sam", None);
        let body = "[Contact Name] [Job Title]";
        assert_eq!(
            substitute_tokens(body, Some(&c), None, None),
            substitute_tokens(body, Some(&c), None, None)
        );
    }
}
