//! Assessment decoders: an ordered chain of total decoders over raw model text.
//!
//! 1. `StructuredSections`: `# Assessment Case` / `# Questions` / `## Question N` layout
//! 2. `EmbeddedJson`: first JSON object carrying a `questions` array
//! 3. `PlainTextSalvage`: synthetic minimal assessment, always usable
//!
//! The first `Full` result wins. A `Partial` result (questions, no context) is kept
//! as a fallback and patched with the generic context if nothing better turns up.
//! No decoder can fail.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::assessment::id_map::{clean_name, CompetencyIdMap};
use crate::assessment::models::{
    AssessmentQuestion, CompetencyRef, DecoderTier, GeneratedAssessment,
};
use crate::reconcile::{fenced_block, find_object};

pub const GENERIC_CONTEXT: &str = "This assessment evaluates the practical skills required \
    for the role through a realistic work scenario drawn from the job description.";
pub const PLACEHOLDER_CONTEXT: &str =
    "Consider a typical technical task you would face in this role.";
pub const PLACEHOLDER_QUESTION: &str = "Describe how you would approach this task end to end \
    and how you would verify the result.";

/// Paragraphs shorter than this are not taken as an assessment context.
const MIN_CONTEXT_PARAGRAPH_CHARS: usize = 50;
/// Lines shorter than this are not worth salvaging into a question.
const MIN_SALVAGE_LINE_CHARS: usize = 10;
const SALVAGE_COMPETENCIES: usize = 2;

static PARAGRAPH_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n").expect("Invalid paragraph split regex"));

static QUESTION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^question\s*#?\s*\d+\b").expect("Invalid question heading regex"));

static SKILLS_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t>*_-]*(?:skills|competencies)[ \t]+assessed[ \t*_]*:[ \t*_]*")
        .expect("Invalid skills marker regex")
});

static CONTEXT_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t*_]*context[ \t*_]*:[ \t*_]*").expect("Invalid context label regex")
});

static QUESTION_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t*_]*(?:question|task)[ \t*_]*:[ \t*_]*")
        .expect("Invalid question label regex")
});

// ────────────────────────────────────────────────────────────────────────────
// Decoder contract
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DecodeQuality {
    Empty,
    Partial,
    Full,
}

#[derive(Debug, Clone, Default)]
pub struct Decoded {
    pub context: String,
    pub questions: Vec<AssessmentQuestion>,
}

impl Decoded {
    pub fn quality(&self) -> DecodeQuality {
        match (self.context.trim().is_empty(), self.questions.is_empty()) {
            (_, true) => DecodeQuality::Empty,
            (true, false) => DecodeQuality::Partial,
            (false, false) => DecodeQuality::Full,
        }
    }
}

/// A total decoding strategy. Never panics, never errors.
pub trait AssessmentDecoder {
    fn tier(&self) -> DecoderTier;
    fn decode(&self, text: &str, map: &CompetencyIdMap) -> Decoded;
}

/// Runs the decoder chain and attaches the identifier map.
pub fn reconcile_assessment(text: &str, map: CompetencyIdMap) -> GeneratedAssessment {
    let (tier, decoded) = run_chain(text, &map);
    info!(
        "Assessment decoded by {:?}: {} questions",
        tier,
        decoded.questions.len()
    );
    GeneratedAssessment {
        context: decoded.context,
        questions: decoded.questions,
        competency_id_map: map,
        decoded_by: tier,
    }
}

fn run_chain(text: &str, map: &CompetencyIdMap) -> (DecoderTier, Decoded) {
    let decoders: [&dyn AssessmentDecoder; 2] = [&StructuredSections, &EmbeddedJson];
    let mut partial: Option<(DecoderTier, Decoded)> = None;

    for decoder in decoders {
        let decoded = decoder.decode(text, map);
        let quality = decoded.quality();
        debug!("Decoder {:?} produced {:?}", decoder.tier(), quality);
        match quality {
            DecodeQuality::Full => return (decoder.tier(), decoded),
            DecodeQuality::Partial if partial.is_none() => partial = Some((decoder.tier(), decoded)),
            _ => {}
        }
    }

    if let Some((tier, mut decoded)) = partial {
        decoded.context = GENERIC_CONTEXT.to_string();
        return (tier, decoded);
    }

    (
        PlainTextSalvage.tier(),
        PlainTextSalvage.decode(text, map),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tier 1: structured sections
// ────────────────────────────────────────────────────────────────────────────

pub struct StructuredSections;

impl AssessmentDecoder for StructuredSections {
    fn tier(&self) -> DecoderTier {
        DecoderTier::StructuredSections
    }

    fn decode(&self, text: &str, map: &CompetencyIdMap) -> Decoded {
        let lines: Vec<&str> = text.lines().collect();
        let headings = headings(&lines);

        let context = case_section(&lines, &headings).unwrap_or_default();

        let questions_start = headings
            .iter()
            .find(|h| h.kind == HeadingKind::Questions)
            .map(|h| h.line)
            .unwrap_or(0);

        let question_headings: Vec<&Heading> = headings
            .iter()
            .filter(|h| h.kind == HeadingKind::Question && h.line >= questions_start)
            .collect();

        let questions = question_headings
            .iter()
            .filter_map(|h| {
                let end = headings
                    .iter()
                    .find(|next| next.line > h.line && next.kind != HeadingKind::Other)
                    .map(|next| next.line)
                    .unwrap_or(lines.len());
                parse_question_block(&lines[h.line + 1..end].join("\n"), map)
            })
            .collect();

        Decoded { context, questions }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadingKind {
    Case,
    Questions,
    Question,
    Other,
}

#[derive(Debug)]
struct Heading {
    line: usize,
    kind: HeadingKind,
}

fn headings(lines: &[&str]) -> Vec<Heading> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(line, raw)| {
            let title = heading_title(raw)?;
            let lower = title.to_lowercase();
            let kind = if lower.starts_with("assessment case") {
                HeadingKind::Case
            } else if lower.starts_with("questions") {
                HeadingKind::Questions
            } else if QUESTION_HEADING.is_match(&title) {
                HeadingKind::Question
            } else {
                HeadingKind::Other
            };
            Some(Heading { line, kind })
        })
        .collect()
}

/// Title of a Markdown `#` heading or a whole-line bold heading.
fn heading_title(line: &str) -> Option<String> {
    let t = line.trim();
    let inner = if t.starts_with('#') {
        t.trim_start_matches('#').trim_end_matches('#')
    } else if t.len() > 4 && t.starts_with("**") && t.ends_with("**") {
        &t[2..t.len() - 2]
    } else {
        return None;
    };
    let title = inner
        .trim()
        .trim_matches('*')
        .trim()
        .trim_end_matches(':')
        .trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Body of the `Assessment Case` section, ending at the questions or the next heading.
fn case_section(lines: &[&str], headings: &[Heading]) -> Option<String> {
    let case = headings.iter().find(|h| h.kind == HeadingKind::Case)?;
    let later = || headings.iter().filter(move |h| h.line > case.line);
    let end = later()
        .find(|h| matches!(h.kind, HeadingKind::Questions | HeadingKind::Question))
        .or_else(|| later().next())
        .map(|h| h.line)
        .unwrap_or(lines.len());
    let body = lines[case.line + 1..end].join("\n").trim().to_string();
    (!body.is_empty()).then_some(body)
}

fn parse_question_block(block: &str, map: &CompetencyIdMap) -> Option<AssessmentQuestion> {
    let (body, names) = match SKILLS_MARKER.find(block) {
        Some(m) => (&block[..m.start()], first_paragraph(&block[m.end()..])),
        None => (block, ""),
    };

    let (context, question) = split_context_and_question(body);
    if question.is_empty() {
        return None;
    }

    Some(AssessmentQuestion {
        context,
        question,
        competencies_assessed: resolve_names(split_names(names), map),
    })
}

/// Explicit `Context:` / `Question:` labels win. Otherwise the first paragraph is the
/// context and every remaining paragraph belongs to the question.
fn split_context_and_question(body: &str) -> (String, String) {
    if let Some(q) = QUESTION_LABEL.find(body) {
        let question = body[q.end()..].trim().to_string();
        let before = &body[..q.start()];
        let context = match CONTEXT_LABEL.find(before) {
            Some(c) => &before[c.end()..],
            None => before,
        };
        return (context.trim().to_string(), question);
    }

    let paragraphs: Vec<&str> = PARAGRAPH_SPLIT
        .split(body)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    match paragraphs.as_slice() {
        [] => (String::new(), String::new()),
        [only] => (String::new(), only.to_string()),
        [first, rest @ ..] => (first.to_string(), rest.join("\n\n")),
    }
}

fn first_paragraph(text: &str) -> &str {
    PARAGRAPH_SPLIT
        .split(text.trim_start())
        .next()
        .unwrap_or_default()
}

fn split_names(list: &str) -> Vec<String> {
    list.split([',', ';', '\n'])
        .map(clean_name)
        .filter(|name| !name.is_empty())
        .collect()
}

fn resolve_names(names: Vec<String>, map: &CompetencyIdMap) -> Vec<CompetencyRef> {
    names.iter().map(|name| map.resolve(name)).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tier 2: embedded JSON
// ────────────────────────────────────────────────────────────────────────────

pub struct EmbeddedJson;

impl AssessmentDecoder for EmbeddedJson {
    fn tier(&self) -> DecoderTier {
        DecoderTier::EmbeddedJson
    }

    fn decode(&self, text: &str, map: &CompetencyIdMap) -> Decoded {
        let Some(object) = find_object(text, |obj| obj.get("questions").is_some_and(Value::is_array))
        else {
            return Decoded::default();
        };
        let Some(items) = object.get("questions").and_then(Value::as_array) else {
            return Decoded::default();
        };

        let questions = items
            .iter()
            .filter_map(|item| json_question(item, map))
            .collect();

        let context = string_field(&object, &["context"])
            .or_else(|| markdown_context(text))
            .or_else(|| first_long_paragraph(text))
            .unwrap_or_default();

        Decoded { context, questions }
    }
}

fn json_question(item: &Value, map: &CompetencyIdMap) -> Option<AssessmentQuestion> {
    let (context, question, names) = match item {
        Value::String(s) => (String::new(), s.trim().to_string(), Vec::new()),
        Value::Object(obj) => {
            let names = ["competencies_assessed", "skills_assessed"]
                .iter()
                .find_map(|key| obj.get(*key))
                .map(json_names)
                .unwrap_or_default();
            (
                string_field(obj, &["context", "scenario"]).unwrap_or_default(),
                string_field(obj, &["question", "text", "prompt"]).unwrap_or_default(),
                names,
            )
        }
        _ => return None,
    };

    if question.is_empty() {
        return None;
    }
    Some(AssessmentQuestion {
        context,
        question,
        competencies_assessed: resolve_names(names, map),
    })
}

/// Names as an array of strings, an array of `{name}` objects, or one comma-separated string.
fn json_names(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => split_names(s),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(clean_name(s)),
                Value::Object(obj) => string_field(obj, &["name", "competency"]).map(|s| clean_name(&s)),
                _ => None,
            })
            .filter(|name| !name.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn string_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A fenced `markdown` block: its `Assessment Case` section if present, else the whole block.
fn markdown_context(text: &str) -> Option<String> {
    let block = fenced_block(text, "markdown").or_else(|| fenced_block(text, "md"))?;
    let lines: Vec<&str> = block.lines().collect();
    case_section(&lines, &headings(&lines))
        .or_else(|| (!block.is_empty()).then(|| block.to_string()))
}

fn first_long_paragraph(text: &str) -> Option<String> {
    PARAGRAPH_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|p| !p.starts_with('{') && !p.starts_with('[') && !p.starts_with("```"))
        .find(|p| p.chars().count() > MIN_CONTEXT_PARAGRAPH_CHARS)
        .map(str::to_string)
}

// ────────────────────────────────────────────────────────────────────────────
// Tier 3: plain-text salvage
// ────────────────────────────────────────────────────────────────────────────

pub struct PlainTextSalvage;

impl AssessmentDecoder for PlainTextSalvage {
    fn tier(&self) -> DecoderTier {
        DecoderTier::PlainTextSalvage
    }

    fn decode(&self, text: &str, map: &CompetencyIdMap) -> Decoded {
        let usable: Vec<&str> = text
            .lines()
            .map(|l| l.trim().trim_start_matches(['#', '*', '-', '>']).trim())
            .filter(|l| !l.starts_with("```"))
            .filter(|l| l.chars().count() >= MIN_SALVAGE_LINE_CHARS)
            .filter(|l| l.chars().any(char::is_alphabetic))
            .collect();

        let (context, question) = match usable.as_slice() {
            [first, second, _, ..] => (first.to_string(), second.to_string()),
            _ => (PLACEHOLDER_CONTEXT.to_string(), PLACEHOLDER_QUESTION.to_string()),
        };

        Decoded {
            context: GENERIC_CONTEXT.to_string(),
            questions: vec![AssessmentQuestion {
                context,
                question,
                competencies_assessed: map
                    .entries()
                    .take(SALVAGE_COMPETENCIES)
                    .map(|e| e.to_ref())
                    .collect(),
            }],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::snapshot::tests::sample_taxonomy;
    use crate::taxonomy::{EntityId, Snapshot};

    fn map() -> CompetencyIdMap {
        CompetencyIdMap::from_snapshot(&Snapshot::build(&sample_taxonomy()))
    }

    fn decode(text: &str) -> GeneratedAssessment {
        reconcile_assessment(text, map())
    }

    const TIER1_EXAMPLE: &str = "# Assessment Case\nBuild X.\n\n# Questions\n## Question 1\nSome context.\n\nWrite the code.\n\nSkills assessed: ES6+, Async";

    #[test]
    fn test_tier1_example() {
        let a = decode(TIER1_EXAMPLE);
        assert_eq!(a.decoded_by, DecoderTier::StructuredSections);
        assert_eq!(a.context, "Build X.");
        assert_eq!(a.questions.len(), 1);
        let q = &a.questions[0];
        assert_eq!(q.context, "Some context.");
        assert_eq!(q.question, "Write the code.");
        assert_eq!(
            q.competencies_assessed,
            vec![
                CompetencyRef {
                    id: Some(EntityId(10)),
                    name: "ES6+".to_string(),
                    skill_id: Some(EntityId(3)),
                },
                CompetencyRef {
                    id: Some(EntityId(11)),
                    name: "Async".to_string(),
                    skill_id: Some(EntityId(3)),
                },
            ]
        );
    }

    #[test]
    fn test_tier1_multiple_questions_and_multi_paragraph_body() {
        let text = "\
Sure, here's the assessment.

## Assessment Case
You join a team maintaining a payments API.
It has grown slow.

## Questions

### Question 1: Profiling
The checkout endpoint takes 3s.

Explain how you would find the bottleneck.

Then describe the fix you would try first.

**Skills assessed:** Async, Ownership

### Question 2
Write a SQL query joining orders to customers.

Skills assessed:
- Joins
- Query Tuning

Good luck!";
        let a = decode(text);
        assert_eq!(a.decoded_by, DecoderTier::StructuredSections);
        assert_eq!(
            a.context,
            "You join a team maintaining a payments API.\nIt has grown slow."
        );
        assert_eq!(a.questions.len(), 2);

        let q1 = &a.questions[0];
        assert_eq!(q1.context, "The checkout endpoint takes 3s.");
        assert_eq!(
            q1.question,
            "Explain how you would find the bottleneck.\n\nThen describe the fix you would try first."
        );
        let names: Vec<_> = q1.competencies_assessed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Async", "Ownership"]);

        let q2 = &a.questions[1];
        assert_eq!(q2.context, "");
        assert_eq!(q2.question, "Write a SQL query joining orders to customers.");
        assert_eq!(q2.competencies_assessed.len(), 2);
        assert!(q2.competencies_assessed[0].id.unwrap().is_synthetic());
        // unknown names are kept, not dropped
        assert_eq!(q2.competencies_assessed[1].name, "Query Tuning");
        assert_eq!(q2.competencies_assessed[1].id, None);
        assert_eq!(q2.competencies_assessed[1].skill_id, None);
    }

    #[test]
    fn test_tier1_explicit_labels() {
        let text = "# Assessment Case\nA startup ships a React app.\n\n# Questions\n## Question 1\nContext: The bundle is 4MB.\n\nQuestion: Reduce it.\n\nAlso explain the trade-offs.\nSkills assessed: ES6+";
        let a = decode(text);
        let q = &a.questions[0];
        assert_eq!(q.context, "The bundle is 4MB.");
        assert_eq!(q.question, "Reduce it.\n\nAlso explain the trade-offs.");
        assert_eq!(q.competencies_assessed[0].id, Some(EntityId(10)));
    }

    #[test]
    fn test_tier1_wins_over_conflicting_json() {
        let text = format!(
            "{TIER1_EXAMPLE}\n\n```json\n{}\n```",
            r#"{"context": "JSON case", "questions": [{"question": "JSON question", "competencies_assessed": ["Joins"]}]}"#
        );
        let a = decode(&text);
        assert_eq!(a.decoded_by, DecoderTier::StructuredSections);
        assert_eq!(a.context, "Build X.");
        assert_eq!(a.questions.len(), 1);
        assert_eq!(a.questions[0].question, "Write the code.");
    }

    #[test]
    fn test_tier2_json_with_context() {
        let text = r#"Here you go:
```json
{
  "context": "Migrate a monolith.",
  "questions": [
    {"context": "Step one.", "question": "Split the auth module.", "competencies_assessed": ["Ownership", {"name": "Lifetimes"}]},
    {"question": "   "},
    "Explain your rollback plan."
  ]
}
```"#;
        let a = decode(text);
        assert_eq!(a.decoded_by, DecoderTier::EmbeddedJson);
        assert_eq!(a.context, "Migrate a monolith.");
        assert_eq!(a.questions.len(), 2);
        assert_eq!(a.questions[0].context, "Step one.");
        assert_eq!(a.questions[0].competencies_assessed[0].id, Some(EntityId(12)));
        assert_eq!(a.questions[0].competencies_assessed[1].id, Some(EntityId(-30_004)));
        assert_eq!(a.questions[1].question, "Explain your rollback plan.");
    }

    #[test]
    fn test_tier2_skips_object_whose_questions_is_not_an_array() {
        let text = r#"Plan: {"questions": "listed in the next block"}

{"context": "Scale the checkout.", "questions": [{"question": "Shard the orders table.", "competencies_assessed": ["Indexing"]}]}"#;
        let a = decode(text);
        assert_eq!(a.decoded_by, DecoderTier::EmbeddedJson);
        assert_eq!(a.context, "Scale the checkout.");
        assert_eq!(a.questions.len(), 1);
        assert_eq!(a.questions[0].question, "Shard the orders table.");
        assert_eq!(a.questions[0].competencies_assessed[0].id, Some(EntityId(-30_006)));
    }

    #[test]
    fn test_tier2_accepts_legacy_skills_assessed() {
        let text = r#"{"context": "Case.", "questions": [{"question": "Q?", "skills_assessed": "ES6+, Async"}]}"#;
        let a = decode(text);
        assert_eq!(a.decoded_by, DecoderTier::EmbeddedJson);
        let ids: Vec<_> = a.questions[0]
            .competencies_assessed
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![Some(EntityId(10)), Some(EntityId(11))]);
    }

    #[test]
    fn test_tier2_context_from_markdown_block() {
        let text = "```markdown\n# Assessment Case\nDesign a rate limiter.\n```\n\n```json\n{\"questions\": [{\"question\": \"Pick an algorithm.\"}]}\n```";
        let a = decode(text);
        assert_eq!(a.decoded_by, DecoderTier::EmbeddedJson);
        assert_eq!(a.context, "Design a rate limiter.");
    }

    #[test]
    fn test_tier2_context_from_first_long_paragraph() {
        let text = "Intro.\n\nYou are joining a logistics company whose routing service keeps timing out.\n\n{\"questions\": [{\"question\": \"Find the cause.\"}]}";
        let a = decode(text);
        assert_eq!(a.decoded_by, DecoderTier::EmbeddedJson);
        assert_eq!(
            a.context,
            "You are joining a logistics company whose routing service keeps timing out."
        );
    }

    #[test]
    fn test_partial_result_gets_generic_context() {
        let text = "{\"questions\": [{\"question\": \"Find the cause.\"}]}";
        let a = decode(text);
        assert_eq!(a.decoded_by, DecoderTier::EmbeddedJson);
        assert_eq!(a.context, GENERIC_CONTEXT);
        assert_eq!(a.questions.len(), 1);
    }

    #[test]
    fn test_tier1_questions_without_case_fall_through_to_json() {
        let text = "## Question 1\nDo a thing.\n\n{\"context\": \"Json case.\", \"questions\": [{\"question\": \"Json q.\"}]}";
        let a = decode(text);
        assert_eq!(a.decoded_by, DecoderTier::EmbeddedJson);
        assert_eq!(a.context, "Json case.");
    }

    #[test]
    fn test_full_degradation_example() {
        let a = decode("I cannot help with that.");
        assert_eq!(a.decoded_by, DecoderTier::PlainTextSalvage);
        assert_eq!(a.context, GENERIC_CONTEXT);
        assert_eq!(a.questions.len(), 1);
        assert_eq!(a.questions[0].question, PLACEHOLDER_QUESTION);
        assert_eq!(a.questions[0].competencies_assessed.len(), 2);
        assert!(a.questions[0].competencies_assessed.iter().all(|c| c.id.is_some()));
    }

    #[test]
    fn test_salvage_uses_first_two_usable_lines() {
        let text = "Consider a service under heavy load.\nHow would you scale the write path?\nThink about queues and batching.\nok";
        let a = decode(text);
        assert_eq!(a.decoded_by, DecoderTier::PlainTextSalvage);
        assert_eq!(a.questions[0].context, "Consider a service under heavy load.");
        assert_eq!(a.questions[0].question, "How would you scale the write path?");
    }

    #[test]
    fn test_salvage_with_empty_map_has_no_competencies() {
        let a = reconcile_assessment("nothing", CompetencyIdMap::default());
        assert_eq!(a.questions.len(), 1);
        assert!(a.questions[0].competencies_assessed.is_empty());
    }

    #[test]
    fn test_degradation_never_empty() {
        let inputs = [
            "",
            "   \n\n  ",
            "{",
            "}}}{{{",
            "# Assessment Case\n\n# Questions\n",
            "## Question 1\n\nSkills assessed: ES6+",
            "{\"questions\": \"not an array\"}",
            "{\"questions\": [42, null, {}]}",
            "```json\n{\"questions\": [\n```",
            "Skills assessed: ES6+\nSkills assessed: Async",
            "* * *\n# \n## Question\n**",
        ];
        for input in inputs {
            let a = decode(input);
            assert!(!a.context.trim().is_empty(), "empty context for {input:?}");
            assert!(!a.questions.is_empty(), "no questions for {input:?}");
            assert!(
                a.questions.iter().all(|q| !q.question.trim().is_empty()),
                "blank question for {input:?}"
            );
        }
    }

    #[test]
    fn test_heading_title_variants() {
        assert_eq!(heading_title("## Question 1").as_deref(), Some("Question 1"));
        assert_eq!(heading_title("**Assessment Case:**").as_deref(), Some("Assessment Case"));
        assert_eq!(heading_title("# **Questions** #").as_deref(), Some("Questions"));
        assert_eq!(heading_title("Skills assessed: x"), None);
        assert_eq!(heading_title("##"), None);
    }

    #[test]
    fn test_quality_signal() {
        let mut d = Decoded::default();
        assert_eq!(d.quality(), DecodeQuality::Empty);
        d.context = "ctx".to_string();
        assert_eq!(d.quality(), DecodeQuality::Empty);
        d.questions.push(AssessmentQuestion {
            context: String::new(),
            question: "q".to_string(),
            competencies_assessed: vec![],
        });
        assert_eq!(d.quality(), DecodeQuality::Full);
        d.context.clear();
        assert_eq!(d.quality(), DecodeQuality::Partial);
    }
}
