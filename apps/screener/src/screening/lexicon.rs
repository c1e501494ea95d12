//! Skill lexicon: canonical tokens, synonym folding, related-skill adjacency,
//! and boundary-aware term search over free text.
//!
//! Matching downstream is exact set membership on canonical tokens, so every
//! path that produces a skill token must go through `normalize_skill`.

struct SkillDef {
    canonical: &'static str,
    display: &'static str,
    /// Lowercase surface forms, including the canonical token itself.
    aliases: &'static [&'static str],
}

const SKILLS: &[SkillDef] = &[
    SkillDef { canonical: "python", display: "Python", aliases: &["python", "python3"] },
    SkillDef { canonical: "javascript", display: "JavaScript", aliases: &["javascript", "js", "ecmascript", "es6"] },
    SkillDef { canonical: "typescript", display: "TypeScript", aliases: &["typescript", "ts"] },
    SkillDef { canonical: "java", display: "Java", aliases: &["java"] },
    SkillDef { canonical: "kotlin", display: "Kotlin", aliases: &["kotlin"] },
    SkillDef { canonical: "scala", display: "Scala", aliases: &["scala"] },
    SkillDef { canonical: "go", display: "Go", aliases: &["golang"] },
    SkillDef { canonical: "rust", display: "Rust", aliases: &["rust"] },
    SkillDef { canonical: "c++", display: "C++", aliases: &["c++", "cpp"] },
    SkillDef { canonical: "c#", display: "C#", aliases: &["c#", "csharp"] },
    SkillDef { canonical: "ruby", display: "Ruby", aliases: &["ruby", "ruby on rails", "rails"] },
    SkillDef { canonical: "php", display: "PHP", aliases: &["php"] },
    SkillDef { canonical: "swift", display: "Swift", aliases: &["swift"] },
    SkillDef { canonical: "sql", display: "SQL", aliases: &["sql"] },
    SkillDef { canonical: "postgresql", display: "PostgreSQL", aliases: &["postgresql", "postgres"] },
    SkillDef { canonical: "mysql", display: "MySQL", aliases: &["mysql"] },
    SkillDef { canonical: "mongodb", display: "MongoDB", aliases: &["mongodb", "mongo"] },
    SkillDef { canonical: "redis", display: "Redis", aliases: &["redis"] },
    SkillDef { canonical: "kafka", display: "Kafka", aliases: &["kafka", "apache kafka"] },
    SkillDef { canonical: "react", display: "React", aliases: &["react", "react.js", "reactjs"] },
    SkillDef { canonical: "vue", display: "Vue", aliases: &["vue", "vue.js", "vuejs"] },
    SkillDef { canonical: "angular", display: "Angular", aliases: &["angular", "angularjs"] },
    SkillDef { canonical: "node.js", display: "Node.js", aliases: &["node.js", "nodejs"] },
    SkillDef { canonical: "django", display: "Django", aliases: &["django"] },
    SkillDef { canonical: "flask", display: "Flask", aliases: &["flask"] },
    SkillDef { canonical: "fastapi", display: "FastAPI", aliases: &["fastapi"] },
    SkillDef { canonical: "spring", display: "Spring Boot", aliases: &["spring boot", "spring"] },
    SkillDef { canonical: "aws", display: "AWS", aliases: &["aws", "amazon web services"] },
    SkillDef { canonical: "gcp", display: "GCP", aliases: &["gcp", "google cloud", "google cloud platform"] },
    SkillDef { canonical: "azure", display: "Azure", aliases: &["azure", "microsoft azure"] },
    SkillDef { canonical: "docker", display: "Docker", aliases: &["docker"] },
    SkillDef { canonical: "kubernetes", display: "Kubernetes", aliases: &["kubernetes", "k8s"] },
    SkillDef { canonical: "terraform", display: "Terraform", aliases: &["terraform"] },
    SkillDef { canonical: "pulumi", display: "Pulumi", aliases: &["pulumi"] },
    SkillDef { canonical: "cloudformation", display: "CloudFormation", aliases: &["cloudformation"] },
    SkillDef { canonical: "ansible", display: "Ansible", aliases: &["ansible"] },
    SkillDef { canonical: "jenkins", display: "Jenkins", aliases: &["jenkins"] },
    SkillDef { canonical: "ci_cd", display: "CI/CD", aliases: &["ci/cd", "cicd", "continuous integration"] },
    SkillDef { canonical: "git", display: "Git", aliases: &["git"] },
    SkillDef { canonical: "linux", display: "Linux", aliases: &["linux"] },
    SkillDef { canonical: "graphql", display: "GraphQL", aliases: &["graphql"] },
    SkillDef { canonical: "rest_api", display: "REST APIs", aliases: &["rest api", "rest apis", "restful"] },
    SkillDef { canonical: "microservices", display: "Microservices", aliases: &["microservices", "microservice"] },
    SkillDef { canonical: "machine_learning", display: "Machine Learning", aliases: &["machine learning", "ml"] },
    SkillDef { canonical: "pytorch", display: "PyTorch", aliases: &["pytorch"] },
    SkillDef { canonical: "tensorflow", display: "TensorFlow", aliases: &["tensorflow"] },
    SkillDef { canonical: "pandas", display: "pandas", aliases: &["pandas"] },
    SkillDef { canonical: "spark", display: "Spark", aliases: &["spark", "apache spark", "pyspark"] },
    SkillDef { canonical: "hadoop", display: "Hadoop", aliases: &["hadoop"] },
    SkillDef { canonical: "airflow", display: "Airflow", aliases: &["airflow", "apache airflow"] },
    SkillDef { canonical: "agile", display: "Agile", aliases: &["agile"] },
    SkillDef { canonical: "scrum", display: "Scrum", aliases: &["scrum"] },
];

/// Adjacent skills that earn partial credit for each other. Symmetric.
const RELATED: &[(&str, &str)] = &[
    ("javascript", "typescript"),
    ("javascript", "node.js"),
    ("react", "vue"),
    ("react", "angular"),
    ("vue", "angular"),
    ("java", "kotlin"),
    ("java", "scala"),
    ("c++", "rust"),
    ("docker", "kubernetes"),
    ("aws", "gcp"),
    ("aws", "azure"),
    ("gcp", "azure"),
    ("terraform", "pulumi"),
    ("terraform", "cloudformation"),
    ("terraform", "ansible"),
    ("postgresql", "mysql"),
    ("postgresql", "sql"),
    ("mysql", "sql"),
    ("django", "flask"),
    ("django", "fastapi"),
    ("flask", "fastapi"),
    ("pytorch", "tensorflow"),
    ("spark", "hadoop"),
    ("jenkins", "ci_cd"),
    ("agile", "scrum"),
];

struct AttributeDef {
    name: &'static str,
    display: &'static str,
    /// Phrases in a job description that ask for the attribute.
    requirement_cues: &'static [&'static str],
}

pub const DEGREE: &str = "degree";
pub const ADVANCED_DEGREE: &str = "advanced_degree";
pub const LEADERSHIP: &str = "leadership";

const ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef {
        name: DEGREE,
        display: "Bachelor's degree",
        requirement_cues: &["bachelor", "bachelor's", "degree in", "bs/ms", "b.s."],
    },
    AttributeDef {
        name: ADVANCED_DEGREE,
        display: "Advanced degree",
        requirement_cues: &["master's", "masters", "phd", "ph.d", "doctorate"],
    },
    AttributeDef {
        name: LEADERSHIP,
        display: "Leadership experience",
        requirement_cues: &["leadership", "lead a team", "leading teams", "mentor", "people management"],
    },
];

/// Evidence of an attribute in a resume, with the confidence it earns.
const PROFILE_ATTRIBUTE_CUES: &[(&str, &str, f64)] = &[
    (DEGREE, "bachelor", 1.0),
    (DEGREE, "b.s.", 1.0),
    (DEGREE, "b.sc", 1.0),
    (DEGREE, "bsc", 1.0),
    (DEGREE, "b.a.", 1.0),
    (DEGREE, "b.tech", 1.0),
    (DEGREE, "btech", 1.0),
    (DEGREE, "undergraduate degree", 1.0),
    (ADVANCED_DEGREE, "master", 1.0),
    (ADVANCED_DEGREE, "m.s.", 1.0),
    (ADVANCED_DEGREE, "msc", 1.0),
    (ADVANCED_DEGREE, "mba", 1.0),
    (ADVANCED_DEGREE, "phd", 1.0),
    (ADVANCED_DEGREE, "ph.d", 1.0),
    (ADVANCED_DEGREE, "doctorate", 1.0),
    (LEADERSHIP, "led a team", 0.8),
    (LEADERSHIP, "led teams", 0.8),
    (LEADERSHIP, "team lead", 0.8),
    (LEADERSHIP, "tech lead", 0.8),
    (LEADERSHIP, "managed a team", 0.8),
    (LEADERSHIP, "engineering manager", 0.8),
    (LEADERSHIP, "head of", 0.8),
    (LEADERSHIP, "mentored", 0.6),
    (LEADERSHIP, "mentoring", 0.6),
];

/// Upper bound on any years-of-experience figure taken from free text.
pub const MAX_PLAUSIBLE_YEARS: u32 = 50;

/// Folds a raw skill mention to its canonical token. Unknown skills are
/// lowercased with whitespace collapsed so they still compare exactly.
pub fn normalize_skill(raw: &str) -> String {
    let collapsed = collapse_whitespace(&raw.trim().to_lowercase());
    match canonical_skill(&collapsed) {
        Some(canonical) => canonical.to_string(),
        None => collapsed,
    }
}

/// Exact alias lookup. `raw` must already be lowercase.
fn canonical_skill(raw: &str) -> Option<&'static str> {
    SKILLS
        .iter()
        .find(|def| def.canonical == raw || def.aliases.contains(&raw))
        .map(|def| def.canonical)
}

pub fn skill_display_name(token: &str) -> String {
    match SKILLS.iter().find(|def| def.canonical == token) {
        Some(def) => def.display.to_string(),
        None => capitalize(token),
    }
}

/// Folds a raw attribute name (e.g. "Bachelor's degree", "Leadership") to a
/// known attribute, or a snake_case form of the input.
pub fn normalize_attribute(raw: &str) -> String {
    let lower = collapse_whitespace(&raw.trim().to_lowercase());
    for def in ATTRIBUTES {
        if lower == def.name
            || lower == def.display.to_lowercase()
            || def.requirement_cues.iter().any(|cue| lower.contains(cue))
        {
            return def.name.to_string();
        }
    }
    lower.replace([' ', '-'], "_")
}

pub fn attribute_display_name(name: &str) -> String {
    match ATTRIBUTES.iter().find(|def| def.name == name) {
        Some(def) => def.display.to_string(),
        None => capitalize(&name.replace('_', " ")),
    }
}

pub fn are_related(a: &str, b: &str) -> bool {
    RELATED
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// First skill in `skills` adjacent to `token`, in sorted order.
pub fn related_skill<'a, I>(token: &str, skills: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    skills
        .into_iter()
        .map(String::as_str)
        .find(|candidate| are_related(token, candidate))
}

/// Canonical skills mentioned in `text`, ordered by first appearance.
pub fn find_skills(text: &str) -> Vec<&'static str> {
    find_skill_positions(text)
        .into_iter()
        .map(|(_, canonical)| canonical)
        .collect()
}

/// Like `find_skills`, with the byte offset of each first mention in the
/// lowercased text.
pub fn find_skill_positions(text: &str) -> Vec<(usize, &'static str)> {
    let lower = text.to_lowercase();
    let mut found: Vec<(usize, &'static str)> = SKILLS
        .iter()
        .filter_map(|def| {
            def.aliases
                .iter()
                .filter_map(|alias| find_term(&lower, alias))
                .min()
                .map(|pos| (pos, def.canonical))
        })
        .collect();
    found.sort_by_key(|&(pos, _)| pos);
    found
}

/// Attributes a job description asks for, ordered by first appearance.
pub fn find_requirement_attributes(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    let mut found: Vec<(usize, &'static str)> = ATTRIBUTES
        .iter()
        .filter_map(|def| {
            def.requirement_cues
                .iter()
                .filter_map(|cue| find_term(&lower, cue))
                .min()
                .map(|pos| (pos, def.name))
        })
        .collect();
    found.sort_by_key(|&(pos, _)| pos);
    found.into_iter().map(|(_, name)| name).collect()
}

/// Attribute evidence in a resume. The strongest cue per attribute wins; an
/// advanced degree also implies a degree.
pub fn find_profile_attributes(text: &str) -> Vec<(&'static str, f64)> {
    let lower = text.to_lowercase();
    let mut found: Vec<(&'static str, f64)> = Vec::new();
    let mut record = |name: &'static str, confidence: f64| {
        match found.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) if entry.1 < confidence => entry.1 = confidence,
            Some(_) => {}
            None => found.push((name, confidence)),
        }
    };

    for &(name, cue, confidence) in PROFILE_ATTRIBUTE_CUES {
        if find_term(&lower, cue).is_some() {
            record(name, confidence);
            if name == ADVANCED_DEGREE {
                record(DEGREE, confidence);
            }
        }
    }
    found
}

/// Largest "N years" / "N+ years" / "N yrs" / "N-M years" figure in `text`,
/// if any. A range counts as its lower bound. Figures above
/// `MAX_PLAUSIBLE_YEARS` are ignored as noise.
pub fn parse_years(text: &str) -> Option<u32> {
    find_years(text).map(|(years, _)| years)
}

/// Like [`parse_years`], also returning the byte offset of the figure.
pub fn find_years(text: &str) -> Option<(u32, usize)> {
    let bytes = text.as_bytes();
    let mut best: Option<(u32, usize)> = None;
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() || (i > 0 && is_figure_glue(bytes[i - 1])) {
            i += 1;
            continue;
        }
        let start = i;
        let (value, end) = read_number(text, start);
        i = end;
        let Some(value) = value else {
            continue;
        };

        let mut unit = skip_filler(bytes, end);
        if let Some(upper) = range_upper_start(text, unit) {
            let (_, upper_end) = read_number(text, upper);
            unit = skip_filler(bytes, upper_end);
            i = upper_end;
        }

        let is_years = starts_with_ignore_case(text, unit, "year")
            || starts_with_ignore_case(text, unit, "yr");
        if is_years
            && value > 0
            && value <= MAX_PLAUSIBLE_YEARS
            && best.map_or(true, |(b, _)| value > b)
        {
            best = Some((value, start));
        }
    }
    best
}

fn is_figure_glue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.'
}

fn read_number(text: &str, start: usize) -> (Option<u32>, usize) {
    let end = text[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |n| start + n);
    (text[start..end].parse().ok(), end)
}

fn skip_filler(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t' | b'+') {
        pos += 1;
    }
    pos
}

/// Start of the upper figure when a range separator ("-", "–", "to") sits at `pos`.
fn range_upper_start(text: &str, pos: usize) -> Option<usize> {
    let rest = text.get(pos..)?;
    let after = if let Some(r) = rest.strip_prefix('-').or_else(|| rest.strip_prefix('–')) {
        r
    } else if starts_with_ignore_case(rest, 0, "to ") {
        &rest[3..]
    } else {
        return None;
    };
    let trimmed = after.trim_start_matches([' ', '\t']);
    trimmed
        .starts_with(|c: char| c.is_ascii_digit())
        .then(|| text.len() - trimmed.len())
}

fn starts_with_ignore_case(text: &str, pos: usize, prefix: &str) -> bool {
    text.as_bytes()
        .get(pos..pos + prefix.len())
        .is_some_and(|s| s.eq_ignore_ascii_case(prefix.as_bytes()))
}

/// Position of the first occurrence of `term` in `haystack` that is not
/// glued to neighbouring word characters. Both sides must be lowercase.
pub fn find_term(haystack: &str, term: &str) -> Option<usize> {
    if term.is_empty() {
        return None;
    }
    haystack.match_indices(term).map(|(pos, _)| pos).find(|&pos| {
        let before = haystack[..pos].chars().next_back();
        let after = haystack[pos + term.len()..].chars().next();
        !before.is_some_and(is_term_char) && !after.is_some_and(is_term_char)
    })
}

fn is_term_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
