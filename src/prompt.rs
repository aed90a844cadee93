//! Prompt and response schema sent to the model.

use serde_json::{json, Value};

/// Build the extraction prompt for the given source code
pub fn build(code: &str) -> String {
    format!(
        r#"You are an expert code analyst who turns source files into portable, reusable code snippets. Analyze the source code below, identify its programming language, and split it into self-contained, well-documented snippets.

Instructions:
1. Read the code provided below.
2. Extract meaningful snippets such as functions, classes, configuration objects, or key algorithmic sections.
3. Every snippet MUST be self-contained: include all import statements or dependencies it needs at the top of its code block so it runs on its own.
4. Add concise comments inside the code explaining what the snippet is for, where it works best, and how to use it.
5. Group related snippets by purpose (e.g. 'Utility Functions', 'Data Models', 'Event Handlers').
6. For each snippet provide a clear title, a one-sentence description, its programming language, and the final commented, self-contained code.
7. Respond only with a JSON array matching the provided schema. Do not add commentary or explanations.

Code to analyze:
```
{}
```
"#,
        code
    )
}

/// Structured output schema: an array of snippet groups
pub fn response_schema() -> Value {
    let string = |description: &str| json!({ "type": "STRING", "description": description });

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "groupTitle": string("A concise title for the group of snippets, e.g. 'Utility Functions' or 'API Integration'."),
                "groupDescription": string("A one-sentence description of the purpose of this group of code snippets."),
                "snippets": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": string("The name of the function, class, or a short title for the code snippet."),
                            "description": string("A brief, one-sentence explanation of what the code snippet does."),
                            "language": string("The programming language of the code, e.g. 'javascript', 'python', 'typescript'."),
                            "code": string("The complete, self-contained code of the snippet. It MUST include all necessary imports and brief, helpful comments explaining its purpose and usage.")
                        },
                        "required": ["title", "description", "language", "code"]
                    }
                }
            },
            "required": ["groupTitle", "groupDescription", "snippets"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_code_in_fence() {
        let prompt = build("fn main() {}");
        assert!(prompt.contains("```\nfn main() {}\n```"));
        assert!(prompt.contains("self-contained"));
    }

    #[test]
    fn schema_requires_all_fields() {
        let schema = response_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(
            schema["items"]["required"],
            json!(["groupTitle", "groupDescription", "snippets"])
        );
        let snippet = &schema["items"]["properties"]["snippets"]["items"];
        assert_eq!(
            snippet["required"],
            json!(["title", "description", "language", "code"])
        );
        assert_eq!(snippet["properties"]["code"]["type"], "STRING");
    }
}
