// Shared prompt constants.
// Each advisory client defines its own prompt templates alongside it;
// this file holds the cross-cutting fragments.

/// System prompt sent with every completion call.
pub const JSON_ONLY_SYSTEM: &str = "You are a professional assistant that always outputs valid JSON.";

/// Appended to every user prompt so the reply is a bare JSON object.
pub const JSON_OBJECT_INSTRUCTION: &str = "\
    請只回傳一個合法的 JSON 物件，不要包含任何 JSON 以外的文字，\
    不要使用 markdown 代碼塊，字段名稱必須與範例完全一致。";

/// Renders a boolean the way the prompts present yes/no answers.
pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "是"
    } else {
        "否"
    }
}

/// Fills `{key}` placeholders in a single pass.
///
/// Braces that do not name a known key (the JSON examples inside templates)
/// are copied through untouched, and substituted values are never re-scanned,
/// so user text containing `{age}` stays literal.
pub fn render(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (v, close))
        });
        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
