//! Deterministic prompt construction for the composer backend.
//!
//! Prompt text is built purely from the personalization request, so the same
//! input always produces the same prompt (and a mocked backend sees stable
//! inputs in tests).

use relata_core::PersonalizeRequest;

/// System prompt framing the personalization task.
pub const PERSONALIZE_SYSTEM_PROMPT: &str = "You personalize professional outreach messages. \
Rewrite the given template for the specific contact and job. Keep it brief, warm, and specific. \
Return only the message text with no commentary.";

/// Build the user prompt for one personalization call.
pub fn personalization_prompt(req: &PersonalizeRequest) -> String {
    let mut prompt = String::new();

    prompt.push_str("Contact:\n");
    prompt.push_str(&format!("- Name: {}\n", req.contact.name));
    if let Some(company) = &req.contact.company {
        prompt.push_str(&format!("- Company: {}\n", company));
    }
    if let Some(industry) = &req.contact.industry {
        prompt.push_str(&format!("- Industry: {}\n", industry));
    }

    if let Some(job) = &req.job {
        prompt.push_str("\nTarget job:\n");
        prompt.push_str(&format!("- Title: {}\n", job.title));
        prompt.push_str(&format!("- Company: {}\n", job.company));
        if let Some(location) = &job.location {
            prompt.push_str(&format!("- Location: {}\n", location));
        }
    } else {
        prompt.push_str("\nNo specific job is attached; ask generally about referrals.\n");
    }

    if let Some(tone) = &req.tone {
        prompt.push_str(&format!("\nTone: {}\n", tone));
    }

    prompt.push_str("\nTemplate to personalize:\n");
    prompt.push_str(&req.template_body);
    prompt
}
