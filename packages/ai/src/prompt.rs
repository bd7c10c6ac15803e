//! Extraction prompt template.
//!
//! The response skeleton is rendered from [`fund_sheets_schema::FIELDS`],
//! so the prompt and the field mapper can never disagree about which
//! fields exist. The value-domain notes (risk level, fund category,
//! currency) are advisory instructions to the model only; nothing
//! downstream enforces them.

/// Builds the single extraction prompt for one fact sheet's text.
#[must_use]
pub fn build_extraction_prompt(document_text: &str) -> String {
    let skeleton = fund_sheets_schema::FIELDS
        .iter()
        .map(|field| format!("    \"{field}\": \"\""))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "Extract the following information from the text as JSON: {document_text}\n\n\
         response format:\n\
         ```json\n\
         {{\n\
         {skeleton}\n\
         }}\n\
         ```\n\
         Note:\n\
         - All output should be in English.\n\
         - Risk Level should be one of the following: Low, Medium, High.\n\
         - Risk Factor: list all.\n\
         - Top Holdings: list all.\n\
         - Fund Category should be one of the following: Balanced, Index, Money Market, Fixed income, Equity.\n\
         - Date format example: 16 Feb 2027\n\
         - Currency should be either USD or IDR\n\
         - Use 'None' for empty data\n\
         - Use uniform terms: 'per annum', 'per transaction'\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_document_text_and_every_field() {
        let prompt = build_extraction_prompt("NAV per unit: 1,523.41 (IDR)");

        assert!(prompt.contains("NAV per unit: 1,523.41 (IDR)"));
        for field in fund_sheets_schema::FIELDS {
            assert!(prompt.contains(&format!("\"{field}\": \"\"")), "{field}");
        }
    }

    #[test]
    fn prompt_asks_for_a_fenced_json_response() {
        let prompt = build_extraction_prompt("text");
        assert!(prompt.contains("```json"));
    }
}
