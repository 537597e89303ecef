//! # Portfolio Content
//!
//! Read-only data the screens display: hero roles, journey locations,
//! projects, skills, the tech ticker and contact details.
//!
//! The built-in content is the default. A TOML file (see `content_file` in
//! the config) may replace it wholesale; it is validated once at load time
//! and never mutated afterwards.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

/// Map coordinate space for journey locations: `x ∈ [0, 1000]`, `y ∈ [0, 500]`.
pub const MAP_WIDTH: f64 = 1000.0;
pub const MAP_HEIGHT: f64 = 500.0;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Hero {
    pub name: String,
    pub tagline: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Location {
    pub id: String,
    pub city: String,
    pub role: String,
    pub year: String,
    pub description: String,
    pub x: f64,
    pub y: f64,
    /// `#RRGGBB`
    pub color: String,
}

impl Location {
    /// Text before the first comma, e.g. "Sydney" for "Sydney, AU".
    pub fn headline(&self) -> &str {
        self.city.split(',').next().unwrap_or(&self.city).trim()
    }

    /// Text after the first comma, or the full city when there is none.
    pub fn subtitle(&self) -> &str {
        self.city
            .split_once(',')
            .map(|(_, rest)| rest.trim())
            .unwrap_or(&self.city)
    }

    /// Parses `color` into RGB, falling back to white for malformed values.
    pub fn rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.color).unwrap_or((255, 255, 255))
    }
}

fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum ProjectStatus {
    Live,
    Private,
    #[serde(rename = "Open Source")]
    OpenSource,
    Research,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Live => "Live",
            ProjectStatus::Private => "Private",
            ProjectStatus::OpenSource => "Open Source",
            ProjectStatus::Research => "Research",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct ProjectLinks {
    pub live: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub role: String,
    pub path: String,
    pub status: ProjectStatus,
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub metrics: BTreeMap<String, String>,
    pub summary: String,
    pub long_description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub links: ProjectLinks,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum SkillCategory {
    Frontend,
    Backend,
    #[serde(rename = "AI/ML")]
    AiMl,
    Tools,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
    /// 0..=100
    pub level: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Contact {
    pub pitch: String,
    pub email: String,
    pub github: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PortfolioContent {
    pub hero: Hero,
    pub locations: Vec<Location>,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub tech_ticker: Vec<String>,
    pub contact: Contact,
    pub resume_path: String,
}

#[derive(Debug)]
pub enum ContentError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Io(e) => write!(f, "content I/O error: {e}"),
            ContentError::Parse(e) => write!(f, "content parse error: {e}"),
            ContentError::Invalid(msg) => write!(f, "invalid content: {msg}"),
        }
    }
}

impl std::error::Error for ContentError {}

impl PortfolioContent {
    pub fn from_toml(text: &str) -> Result<Self, ContentError> {
        let content: PortfolioContent = toml::from_str(text).map_err(ContentError::Parse)?;
        content.validate()?;
        Ok(content)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let text = fs::read_to_string(path).map_err(ContentError::Io)?;
        let content = Self::from_toml(&text)?;
        info!("Loaded portfolio content from {}", path.display());
        Ok(content)
    }

    /// Checks the invariants the screens rely on.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.hero.roles.is_empty() {
            return Err(ContentError::Invalid("hero.roles is empty".into()));
        }

        let mut seen = HashSet::new();
        for location in &self.locations {
            if !seen.insert(location.id.as_str()) {
                return Err(ContentError::Invalid(format!(
                    "duplicate location id '{}'",
                    location.id
                )));
            }
            if !(0.0..=MAP_WIDTH).contains(&location.x) || !(0.0..=MAP_HEIGHT).contains(&location.y)
            {
                return Err(ContentError::Invalid(format!(
                    "location '{}' lies outside the {MAP_WIDTH}x{MAP_HEIGHT} map",
                    location.id
                )));
            }
        }

        if let Some(skill) = self.skills.iter().find(|s| s.level > 100) {
            return Err(ContentError::Invalid(format!(
                "skill '{}' has level {} (max 100)",
                skill.name, skill.level
            )));
        }
        Ok(())
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn metrics(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for PortfolioContent {
    fn default() -> Self {
        Self {
            hero: Hero {
                name: "Ziyi Wang".into(),
                tagline: "Turning Logic into Intelligence.\nBuilding high-impact AI solutions with 90% efficiency.".into(),
                roles: strings(&[
                    "AI Engineer & Full-Stack Developer",
                    "Computer Vision Engineer",
                    "Deep Learning Specialist",
                    "Creative Technologist",
                ]),
            },
            locations: vec![
                Location {
                    id: "china".into(),
                    city: "China".into(),
                    role: "Origin".into(),
                    year: "Start".into(),
                    description: "The foundation. Where logic meets creativity.".into(),
                    x: 730.0,
                    y: 180.0,
                    color: "#EC4899".into(),
                },
                Location {
                    id: "canada".into(),
                    city: "Edmonton, CA".into(),
                    role: "University of Alberta".into(),
                    year: "2018-2023".into(),
                    description: "BSc Mathematics. Building a rigorous analytical framework. GPA 3.4/4.0.".into(),
                    x: 170.0,
                    y: 130.0,
                    color: "#34D399".into(),
                },
                Location {
                    id: "australia".into(),
                    city: "Sydney, AU".into(),
                    role: "UNSW Sydney".into(),
                    year: "2024-Present".into(),
                    description: "Master of IT / AI. Specializing in Computer Vision & Deep Learning. WAM 76.".into(),
                    x: 860.0,
                    y: 390.0,
                    color: "#FFD700".into(),
                },
            ],
            projects: vec![
                Project {
                    id: "objection-builder".into(),
                    title: "Objection Builder".into(),
                    role: "AI SaaS Developer".into(),
                    path: "~/apps/objection-builder".into(),
                    status: ProjectStatus::Live,
                    tech_stack: strings(&["AWS Lambda", "Docker", "Next.js", "Gemini Pro"]),
                    metrics: metrics(&[
                        ("costReduction", "99%"),
                        ("architecture", "Serverless"),
                        ("latency", "<100ms"),
                    ]),
                    summary: "Serverless AI SaaS on AWS cutting costs by 99%.".into(),
                    long_description: "Architected a cost-efficient Serverless solution using AWS Lambda and Amplify. Implemented a secure DevOps pipeline with Docker and ECR to handle AI-driven objection handling responses.".into(),
                    features: strings(&[
                        "Web Adapter Architecture",
                        "High-performance DNS via Cloudflare",
                        "Least Privilege IAM Security",
                    ]),
                    links: ProjectLinks {
                        live: Some("https://www.objectionbuilder.com".into()),
                        github: Some("https://github.com/SpicyyMath/Objection_builder".into()),
                    },
                },
                Project {
                    id: "math-tutor".into(),
                    title: "Adaptive AI Maths Tutor for Personalized Learning".into(),
                    role: "Full-Stack AI Engineer".into(),
                    path: "~/capstone/socratic-tutor".into(),
                    status: ProjectStatus::Private,
                    tech_stack: strings(&["Prompt Engineering", "FastAPI", "React", "MySQL"]),
                    metrics: metrics(&[
                        ("method", "Socratic Prompting"),
                        ("inputs", "Multi-modal"),
                        ("feedback", "Adaptive"),
                    ]),
                    summary: "Multi-phase prompt framework guiding students via hints.".into(),
                    long_description: "A Socratic AI tutoring system designed to guide students through problems rather than giving answers. Developed as a Capstone Project for a client, focusing on pedagogical accuracy.".into(),
                    features: strings(&[
                        "Socratic Chatbot with complex input handling",
                        "Dynamic Worksheet Generation",
                        "Historical Error Analysis",
                        "Gamified Frontend Interface",
                    ]),
                    links: ProjectLinks::default(),
                },
                Project {
                    id: "dynamic-relan".into(),
                    title: "Fashion Item Classification".into(),
                    role: "Computer Vision Eng".into(),
                    path: "~/research/fashion-cnn".into(),
                    status: ProjectStatus::OpenSource,
                    tech_stack: strings(&["PyTorch", "Python", "CBAM"]),
                    metrics: metrics(&[
                        ("accuracy", "85% (Fashion100)"),
                        ("optimization", "70% Faster Training"),
                    ]),
                    summary: "Custom CNN with Hybrid Attention Mechanism.".into(),
                    long_description: "Integrated CBAM + Area Attention within R-ELAN blocks to improve classification accuracy on fashion datasets. Optimized model architecture for faster convergence.".into(),
                    features: strings(&[
                        "Hybrid Attention Mechanism",
                        "Custom Learning Rate Schedulers",
                        "ResNet Architecture Optimization",
                    ]),
                    links: ProjectLinks {
                        live: None,
                        github: Some("https://github.com/SpicyyMath/Fashion-Item-Classification".into()),
                    },
                },
                Project {
                    id: "sea-turtle".into(),
                    title: "Sea Turtle Segmentation".into(),
                    role: "CV Engineer".into(),
                    path: "~/research/marine-bio".into(),
                    status: ProjectStatus::Research,
                    tech_stack: strings(&["DeepLabV3+", "U-Net", "TensorFlow"]),
                    metrics: metrics(&[("mIoU", "0.85"), ("benchmark", "vs Random Forest")]),
                    summary: "Benchmarked Deep Learning models against traditional CV methods.".into(),
                    long_description: "Established DeepLabV3+ as the superior approach for sea turtle segmentation in complex underwater environments, outperforming traditional Random Forest baselines.".into(),
                    features: strings(&[
                        "Model Benchmarking",
                        "Data Augmentation Pipeline",
                        "HOG/SIFT Comparison",
                    ]),
                    links: ProjectLinks {
                        live: None,
                        github: Some("https://github.com/SpicyyMath/Sea-Turtle-Image-Segmentation-and-Identification".into()),
                    },
                },
            ],
            skills: vec![
                Skill { name: "React / Next.js".into(), category: SkillCategory::Frontend, level: 95 },
                Skill { name: "TypeScript".into(), category: SkillCategory::Frontend, level: 90 },
                Skill { name: "Tailwind CSS".into(), category: SkillCategory::Frontend, level: 95 },
                Skill { name: "Node.js".into(), category: SkillCategory::Backend, level: 85 },
                Skill { name: "Gemini / OpenAI API".into(), category: SkillCategory::AiMl, level: 80 },
                Skill { name: "Three.js / R3F".into(), category: SkillCategory::Frontend, level: 75 },
            ],
            tech_ticker: strings(&[
                "PYTHON", "TYPESCRIPT", "RUST", "PYTORCH", "OPENCV", "REACT", "NEXT.JS",
                "THREE.JS", "AWS LAMBDA", "DOCKER", "SERVERLESS", "CLOUDFLARE",
            ]),
            contact: Contact {
                pitch: "Currently available for freelance projects and open to full-time opportunities. Let's build something extraordinary.".into(),
                email: "nathanielbee731@gmail.com".into(),
                github: Some("https://github.com/SpicyyMath".into()),
                linkedin: Some("https://linkedin.com".into()),
            },
            resume_path: "Ziyi_EN_CV_2025_11_28.pdf".into(),
        }
    }
}
