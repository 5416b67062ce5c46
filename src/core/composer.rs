use std::path::Path;

use config::{Config, File};
use serde::Deserialize;

use crate::models::{JobRecord, MatchReason, PreferenceError};

/// Portfolio data used to ground proposals in real past work.
#[derive(Debug, Clone, Deserialize)]
pub struct Portfolio {
    pub name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub outcome: Option<String>,
}

impl Portfolio {
    /// Load from a YAML file, with or without a top-level `portfolio` key.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PreferenceError> {
        let cfg = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;
        match cfg.get::<Portfolio>("portfolio") {
            Ok(portfolio) => Ok(portfolio),
            Err(_) => Ok(cfg.try_deserialize()?),
        }
    }
}

/// Pick the portfolio projects most relevant to a job by technology overlap.
///
/// A direct hit between a project technology and the job's tools/skills
/// counts double; a technology merely mentioned in the title/description
/// counts once. Projects with no overlap are dropped.
pub fn select_relevant_projects<'a>(
    job: &JobRecord,
    projects: &'a [Project],
    max_projects: usize,
) -> Vec<&'a Project> {
    let job_tools: Vec<String> = job
        .tool_list()
        .iter()
        .chain(job.skill_list().iter())
        .map(|t| t.to_lowercase())
        .collect();
    let job_text = format!("{} {}", job.title, job.description).to_lowercase();

    let mut scored: Vec<(usize, &Project)> = projects
        .iter()
        .filter_map(|project| {
            let mut overlap = 0usize;
            for tech in &project.technologies {
                let tech = tech.to_lowercase();
                if job_tools.contains(&tech) {
                    overlap += 2;
                } else if job_text.contains(&tech) {
                    overlap += 1;
                }
            }
            if overlap > 0 {
                Some((overlap, project))
            } else {
                None
            }
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(max_projects)
        .map(|(_, project)| project)
        .collect()
}

/// Build the (system, user) prompt pair for proposal generation.
///
/// The user prompt carries the match score and per-criterion reasons from the
/// matcher so the model can emphasize what actually fits.
pub fn proposal_prompt(
    job: &JobRecord,
    score: f64,
    reasons: &[MatchReason],
    portfolio: &Portfolio,
    max_projects: usize,
) -> (String, String) {
    let system = format!(
        "You are {}, a freelance {}. Write a short, specific proposal for the \
         job below. Lead with the client's problem, reference relevant past \
         work, and close with one concrete next step. No generic filler.",
        portfolio.name,
        if portfolio.headline.is_empty() {
            "professional"
        } else {
            &portfolio.headline
        },
    );

    let mut user = String::new();
    user.push_str(&format!("## Job\nTitle: {}\n", job.title));
    let description: String = job.description.chars().take(1500).collect();
    user.push_str(&format!("Description: {}\n", description));
    let skills = job.skill_list();
    if !skills.is_empty() {
        user.push_str(&format!("Skills: {}\n", skills.join(", ")));
    }

    user.push_str(&format!("\n## Match analysis (score {:.0}/100)\n", score));
    for reason in reasons {
        user.push_str(&format!(
            "- {}: {:.0}% ({})\n",
            reason.criterion,
            reason.score * 100.0,
            reason.detail
        ));
    }

    if !portfolio.summary.is_empty() {
        user.push_str(&format!("\n## About me\n{}\n", portfolio.summary));
    }

    let selected = select_relevant_projects(job, &portfolio.projects, max_projects);
    if !selected.is_empty() {
        user.push_str("\n## Relevant past projects\n");
        for project in selected {
            user.push_str(&format!("- {}: {}", project.name, project.description));
            if !project.technologies.is_empty() {
                user.push_str(&format!(" [{}]", project.technologies.join(", ")));
            }
            if let Some(outcome) = &project.outcome {
                user.push_str(&format!(" Outcome: {}", outcome));
            }
            user.push('\n');
        }
    }

    user.push_str("\nWrite the proposal now. 150-250 words.");

    (system, user)
}
