//! Skill description rendering.
//!
//! Description templates carry two kinds of inline tokens:
//!
//! - markup tags `<X:content>` where `X` is `b` (bold), `d` (debuff) or
//!   `s` (special effect), rewritten into HTML wrappers;
//! - parameter placeholders `<?N>` (the closing `>` is optional),
//!   replaced by the value of parameter row `N` at the skill level.
//!
//! Tags are rewritten first, placeholders second. Interpolated values
//! are not escaped; the output is trusted markup.

use crate::numeric::clamp_skill_level;
use crate::roster::{ParamValue, SkillBlock};

/// The recognized single-letter markup tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupTag {
    Bold,
    Debuff,
    Special,
}

impl MarkupTag {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'b' => Some(MarkupTag::Bold),
            'd' => Some(MarkupTag::Debuff),
            's' => Some(MarkupTag::Special),
            _ => None,
        }
    }

    pub fn wrap(self, content: &str) -> String {
        match self {
            MarkupTag::Bold => format!("<strong>{}</strong>", content),
            MarkupTag::Debuff => format!("<span class=\"debuff\">[{}]</span>", content),
            MarkupTag::Special => format!("<span class=\"special\">⟨{}⟩</span>", content),
        }
    }
}

/// Parse `<X:content>` at the start of `s`, returning the tag, its
/// content and the byte length of the whole token.
fn parse_markup(s: &str) -> Option<(MarkupTag, &str, usize)> {
    let body = s.strip_prefix('<')?;
    let tag = MarkupTag::from_code(body.chars().next()?)?;
    // tag codes are ASCII
    let inner = body[1..].strip_prefix(':')?;
    let end = inner.find('>')?;
    if end == 0 {
        return None;
    }
    Some((tag, &inner[..end], 3 + end + 1))
}

/// Parse `<?token>` or `<?token` at the start of `s`, returning the
/// token and the byte length consumed.
fn parse_placeholder(s: &str) -> Option<(&str, usize)> {
    let inner = s.strip_prefix("<?")?;
    let end = inner
        .find(|c: char| c == '>' || c.is_whitespace())
        .unwrap_or(inner.len());
    if end == 0 {
        return None;
    }
    let closing = usize::from(inner[end..].starts_with('>'));
    Some((&inner[..end], 2 + end + closing))
}

/// Value of a parameter row at a skill level, clamped to the row's last
/// entry. An absent cell falls back to the last entry.
fn level_value(row: &[ParamValue], skill_level: u32) -> Option<&ParamValue> {
    let last = row.len().checked_sub(1)?;
    let index = (skill_level.saturating_sub(1) as usize).min(last);
    let present = |value: &&ParamValue| !value.is_absent();
    row.get(index)
        .filter(present)
        .or_else(|| row.last().filter(present))
}

/// Replacement text for a placeholder token. Non-numeric tokens and
/// out-of-range rows yield the token itself.
fn resolve_placeholder(token: &str, parameters: &[Vec<ParamValue>], skill_level: u32) -> String {
    if token.bytes().all(|b| b.is_ascii_digit()) {
        let value = token
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| parameters.get(index))
            .and_then(|row| level_value(row, skill_level));
        if let Some(value) = value {
            return value.to_string();
        }
    }
    token.to_string()
}

/// Run `replace` over every token `parse` recognizes, copying all other
/// text through unchanged.
fn rewrite<'a, P, R>(text: &'a str, marker: &str, parse: P, mut replace: R) -> String
where
    P: Fn(&'a str) -> Option<(String, usize)>,
    R: FnMut(String) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(marker) {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match parse(candidate) {
            Some((token, len)) => {
                out.push_str(&replace(token));
                rest = &candidate[len..];
            }
            None => {
                // step past '<' only; the next token may start right after it
                out.push('<');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Rewrite `<b:..>`, `<d:..>` and `<s:..>` tags into HTML wrappers.
///
/// # Examples
///
/// ```rust
/// use kivostat::skill_text::render_markup;
///
/// assert_eq!(render_markup("<d:Stun>"), "<span class=\"debuff\">[Stun]</span>");
/// assert_eq!(render_markup("<x:kept>"), "<x:kept>");
/// ```
pub fn render_markup(template: &str) -> String {
    rewrite(
        template,
        "<",
        |s| parse_markup(s).map(|(tag, content, len)| (tag.wrap(content), len)),
        |wrapped| wrapped,
    )
}

/// Substitute `<?N>` placeholders with level-indexed parameter values.
///
/// Without parameters the text is returned unchanged.
pub fn substitute_parameters(
    text: &str,
    parameters: &[Vec<ParamValue>],
    skill_level: u32,
) -> String {
    if parameters.is_empty() {
        return text.to_string();
    }
    rewrite(
        text,
        "<?",
        |s| parse_placeholder(s).map(|(token, len)| (token.to_string(), len)),
        |token| resolve_placeholder(&token, parameters, skill_level),
    )
}

/// Render a skill description template at a skill level.
///
/// # Examples
///
/// ```rust
/// use kivostat::{render_skill_text, ParamValue};
///
/// let params = vec![vec![ParamValue::from(1), ParamValue::from(2), ParamValue::from(3)]];
/// assert_eq!(
///     render_skill_text("<b:Stun> for <?1> sec", &params, 1),
///     "<strong>Stun</strong> for 1 sec"
/// );
/// assert_eq!(render_skill_text("<?1>s", &params, 5), "3s");
/// ```
pub fn render_skill_text(
    template: &str,
    parameters: &[Vec<ParamValue>],
    skill_level: u32,
) -> String {
    let marked = render_markup(template);
    substitute_parameters(&marked, parameters, clamp_skill_level(skill_level))
}

impl SkillBlock {
    /// This skill's description rendered at a skill level.
    pub fn render(&self, skill_level: u32) -> String {
        render_skill_text(
            &self.desc,
            self.parameters.as_deref().unwrap_or(&[]),
            skill_level,
        )
    }
}
