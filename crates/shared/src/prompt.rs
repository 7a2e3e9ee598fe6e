const CATEGORIZATION_INSTRUCTION: &str = r#"You are an excellent task manager. Categorize these tasks into high/medium/low priority and return ONLY a JSON array in this exact format:
[
  {"highPriority": []},
  {"mediumPriority": []},
  {"lowPriority": []}
]

Tasks to categorize:
"#;

/// Builds the categorization prompt for newline-separated task text. The raw
/// text is appended verbatim.
pub fn build_categorization_prompt(raw_tasks: &str) -> String {
    let mut prompt = String::with_capacity(CATEGORIZATION_INSTRUCTION.len() + raw_tasks.len());
    prompt.push_str(CATEGORIZATION_INSTRUCTION);
    prompt.push_str(raw_tasks);
    prompt
}
