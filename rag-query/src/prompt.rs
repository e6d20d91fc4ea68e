//! Prompt builder: joins retrieved chunks and fills the fixed template.

use rag_store::RetrievedDocument;

/// Grounding template sent to the model. `{context}` and `{question}` are
/// substituted once each.
pub const PROMPT_TEMPLATE: &str = "
Answer the question based only on the following context:

{context}

---

Answer the question based on the above context: {question}
";

/// Separator placed between consecutive chunks of the context.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Concatenates document contents in ranking order.
///
/// No trimming; zero documents give an empty string.
pub fn build_context(docs: &[RetrievedDocument]) -> String {
    docs.iter()
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// Fills [`PROMPT_TEMPLATE`] in a single pass.
///
/// Braces inside `context` or `question` are copied verbatim and never
/// treated as placeholders.
///
/// # Example
/// ```
/// use rag_query::prompt::build_prompt;
/// let p = build_prompt("Teff grows at altitude.", "Where does teff grow?");
/// assert!(p.contains("following context:\n\nTeff grows at altitude.\n\n---"));
/// assert!(p.ends_with("above context: Where does teff grow?\n"));
/// ```
pub fn build_prompt(context: &str, question: &str) -> String {
    let mut out = String::with_capacity(PROMPT_TEMPLATE.len() + context.len() + question.len());
    let mut rest = PROMPT_TEMPLATE;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{context}") {
            out.push_str(context);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{question}") {
            out.push_str(question);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn doc(content: &str) -> RetrievedDocument {
        RetrievedDocument {
            content: content.into(),
            metadata: Map::new(),
            score: 0.5,
        }
    }

    #[test]
    fn context_uses_exact_separator() {
        assert_eq!(build_context(&[doc("A"), doc("B")]), "A\n\n---\n\nB");
    }

    #[test]
    fn context_keeps_whitespace() {
        assert_eq!(build_context(&[doc(" A\n"), doc("\tB ")]), " A\n\n\n---\n\n\tB ");
    }

    #[test]
    fn empty_context_for_no_documents() {
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn prompt_matches_template_verbatim() {
        let p = build_prompt("CTX", "Q?");
        assert_eq!(
            p,
            "\nAnswer the question based only on the following context:\n\nCTX\n\n---\n\nAnswer the question based on the above context: Q?\n"
        );
    }

    #[test]
    fn empty_context_still_renders_block() {
        let p = build_prompt("", "Q?");
        assert!(p.contains("following context:\n\n\n\n---"));
    }

    #[test]
    fn placeholders_inside_inputs_are_not_expanded() {
        let p = build_prompt("see {question}", "what is {context}?");
        assert!(p.contains("context:\n\nsee {question}\n\n---"));
        assert!(p.ends_with("above context: what is {context}?\n"));
    }
}
