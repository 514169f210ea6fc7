//! Public page sections
//!
//! Each function renders one section from the site content. Only the contact
//! section depends on anything besides the content.

use chrono::{Datelike, Utc};
use std::fmt::Write;

use super::layout::escape;
use crate::content::{Portfolio, Stat};
use crate::store::DraftField;
use crate::views::{FormState, FormStatus};

/// Anchors of the single-page layout, in scroll order
pub const SECTION_LINKS: [(&str, &str); 6] = [
    ("home", "Home"),
    ("about", "About"),
    ("projects", "Projects"),
    ("skills", "Skills"),
    ("education", "Education"),
    ("contact", "Contact"),
];

pub fn nav(content: &Portfolio) -> String {
    let links: String = SECTION_LINKS
        .iter()
        .map(|(anchor, label)| format!(r##"<a href="/#{anchor}">{label}</a>"##))
        .collect();
    format!(
        r#"<nav><a class="logo" href="/">{initials}</a>{links}</nav>"#,
        initials = escape(&content.profile.initials),
    )
}

pub fn hero(content: &Portfolio) -> String {
    let p = &content.profile;
    format!(
        r##"<section id="home" class="hero">
<p class="meta">Hello, I'm</p>
<h1 class="gradient">{name}</h1>
<p class="title">{title}</p>
<p class="tagline">{tagline}</p>
<p>
<a class="btn btn-primary" href="#contact">Get In Touch</a>
<a class="btn btn-outline" href="#projects">View My Work</a>
</p>
<p class="meta" style="margin-top:24px">{location} · <a href="{github}">GitHub</a> · <a href="{linkedin}">LinkedIn</a> · <a href="mailto:{email}">Email</a></p>
</section>"##,
        name = escape(&p.name),
        title = escape(&p.title),
        tagline = escape(&p.tagline),
        location = escape(&p.location),
        github = escape(&p.github),
        linkedin = escape(&p.linkedin),
        email = escape(&p.email),
    )
}

fn stats(stats: &[Stat]) -> String {
    let mut out = String::from(r#"<div class="grid" style="margin-top:32px">"#);
    for stat in stats {
        let note = stat
            .note
            .as_deref()
            .map(|n| format!(r#"<div class="meta">{}</div>"#, escape(n)))
            .unwrap_or_default();
        let _ = write!(
            out,
            r#"<div class="card stat"><div class="value gradient">{}</div><div class="label">{}</div>{}</div>"#,
            escape(&stat.value),
            escape(&stat.label),
            note,
        );
    }
    out.push_str("</div>");
    out
}

pub fn about(content: &Portfolio) -> String {
    let about = &content.about;
    let paragraphs: String = about
        .paragraphs
        .iter()
        .map(|p| format!("<p style=\"margin-bottom:14px\">{}</p>", escape(p)))
        .collect();
    let highlights: String = about
        .highlights
        .iter()
        .map(|h| {
            format!(
                r#"<div class="card"><h3>{}</h3><p class="meta">{}</p></div>"#,
                escape(&h.title),
                escape(&h.description)
            )
        })
        .collect();

    format!(
        r#"<section id="about">
<h2>About <span class="gradient">Me</span></h2>
<p class="lead">Get to know more about my journey, skills, and what drives me.</p>
<div class="grid"><div>{paragraphs}</div><div class="grid">{highlights}</div></div>
{stats}
</section>"#,
        stats = stats(&about.stats),
    )
}

pub fn projects(content: &Portfolio) -> String {
    let mut cards = String::new();
    for project in &content.projects {
        let tech: String = project
            .tech_stack
            .iter()
            .map(|t| format!(r#"<span class="tag">{}</span>"#, escape(t)))
            .collect();
        let features: String = project
            .features
            .iter()
            .map(|f| format!("<li>{}</li>", escape(f)))
            .collect();
        let mut links = String::new();
        if let Some(url) = &project.demo_url {
            let _ = write!(links, r#"<a class="btn btn-primary" href="{}">Live Demo</a> "#, escape(url));
        }
        if let Some(url) = &project.github_url {
            let _ = write!(links, r#"<a class="btn btn-outline" href="{}">Code</a>"#, escape(url));
        }
        let featured = if project.is_featured {
            r#"<span class="badge unread">Featured</span> "#
        } else {
            ""
        };

        let _ = write!(
            cards,
            r#"<div class="card" id="project-{id}">
<h3>{featured}{title}</h3>
<p class="meta">{description}</p>
<p style="margin-top:10px"><strong>Key Features</strong></p>
<ul class="features">{features}</ul>
<div>{tech}</div>
<p class="meta" style="margin-top:10px"><strong>Role:</strong> {role}</p>
<p style="margin-top:12px">{links}</p>
</div>"#,
            id = escape(&project.id),
            title = escape(&project.title),
            description = escape(&project.description),
            role = escape(&project.role),
        );
    }

    format!(
        r#"<section id="projects">
<h2>Featured <span class="gradient">Projects</span></h2>
<p class="lead">Here are some of the projects I've worked on that showcase my skills and passion for development.</p>
<div class="grid">{cards}</div>
</section>"#
    )
}

pub fn skills(content: &Portfolio) -> String {
    let skills = &content.skills;
    let categories: String = skills
        .categories
        .iter()
        .map(|c| {
            let tags: String = c
                .skills
                .iter()
                .map(|s| format!(r#"<span class="tag">{}</span>"#, escape(s)))
                .collect();
            format!(
                r#"<div class="card" data-color="{}"><h3>{}</h3>{}</div>"#,
                escape(&c.color),
                escape(&c.title),
                tags
            )
        })
        .collect();
    let certifications: String = skills
        .certifications
        .iter()
        .map(|c| {
            format!(
                r#"<div class="card"><h3>{}</h3><p class="meta">{} · {} · {}</p></div>"#,
                escape(&c.title),
                escape(&c.provider),
                escape(&c.duration),
                escape(&c.year)
            )
        })
        .collect();

    format!(
        r#"<section id="skills">
<h2>Skills &amp; <span class="gradient">Expertise</span></h2>
<p class="lead">Technologies and tools I work with to bring ideas to life.</p>
<div class="grid">{categories}</div>
<h3 style="margin-top:40px;text-align:center">Certifications</h3>
<div class="grid" style="margin-top:16px">{certifications}</div>
{summary}
</section>"#,
        summary = stats(&skills.summary),
    )
}

pub fn education(content: &Portfolio) -> String {
    let education = &content.education;
    let mut entries = String::new();
    for entry in &education.entries {
        let filled = entry.grade_dots();
        let dots: String = (0..5)
            .map(|i| {
                if i < filled {
                    r#"<span class="on"></span>"#
                } else {
                    "<span></span>"
                }
            })
            .collect();
        let _ = write!(
            entries,
            r#"<div class="card" data-kind="{kind}">
<h3>{degree}</h3>
<p class="meta">{institution}</p>
<p class="meta">{year}</p>
<p style="margin-top:8px"><strong>CGPA/Percentage:</strong> {cgpa}</p>
<div class="dots">{dots}</div>
</div>"#,
            kind = escape(&entry.kind),
            degree = escape(&entry.degree),
            institution = escape(&entry.institution),
            year = escape(&entry.year),
            cgpa = escape(&entry.cgpa),
        );
    }

    format!(
        r#"<section id="education">
<h2>My <span class="gradient">Education</span></h2>
<p class="lead">My academic journey and the foundation that shaped my passion for technology.</p>
<div class="grid">{entries}</div>
{summary}
</section>"#,
        summary = stats(&education.summary),
    )
}

fn input(field: DraftField, value: &str, kind: &str, disabled: &str) -> String {
    let name = field.as_str();
    format!(
        r#"<label for="{name}">{label}</label><input id="{name}" name="{name}" type="{kind}" value="{value}" required{disabled}>"#,
        label = capitalized(name),
        value = escape(value),
    )
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The contact section for the given form state
pub fn contact(content: &Portfolio, form: &FormState) -> String {
    let info = &content.contact;
    let channels: String = info
        .channels
        .iter()
        .map(|c| {
            format!(
                r#"<div class="card"><h3>{}</h3><a href="{}">{}</a></div>"#,
                escape(&c.title),
                escape(&c.href),
                escape(&c.value)
            )
        })
        .collect();
    let socials: String = info
        .socials
        .iter()
        .map(|s| format!(r#"<a class="tag" href="{}">{}</a>"#, escape(&s.href), escape(&s.name)))
        .collect();

    let panel = match form.status {
        FormStatus::Submitted => r#"<div class="card sent">
<h3>Message Sent!</h3>
<p class="meta">Thank you for reaching out. I'll get back to you soon.</p>
</div>"#
            .to_string(),
        FormStatus::Idle | FormStatus::Submitting => contact_form(form),
    };

    format!(
        r#"<section id="contact">
<h2>Get In <span class="gradient">Touch</span></h2>
<p class="lead">{intro}</p>
<div class="grid">
<div>
<h3>Let's Connect</h3>
<p class="meta" style="margin-bottom:16px">{blurb}</p>
<div class="grid">{channels}</div>
<p style="margin-top:16px">{socials}</p>
</div>
<div>{panel}</div>
</div>
</section>"#,
        intro = escape(&info.intro),
        blurb = escape(&info.blurb),
    )
}

fn contact_form(form: &FormState) -> String {
    let draft = &form.draft;
    let disabled = if form.is_busy() { " disabled" } else { "" };
    let error = form
        .error
        .as_deref()
        .map(|e| format!(r#"<div class="banner error">{}</div>"#, escape(e)))
        .unwrap_or_default();
    let button = if form.is_busy() {
        "Sending..."
    } else {
        "Send Message"
    };

    format!(
        r##"<form class="card" method="post" action="/#contact">
<h3>Send Message</h3>
{error}
<div class="row"><div>{name}</div><div>{email}</div></div>
{subject}
<label for="message">Message</label><textarea id="message" name="message" rows="5" required{disabled}>{message}</textarea>
<p style="margin-top:16px"><button class="btn btn-primary" type="submit"{disabled}>{button}</button></p>
</form>"##,
        name = input(DraftField::Name, &draft.name, "text", disabled),
        email = input(DraftField::Email, &draft.email, "email", disabled),
        subject = input(DraftField::Subject, &draft.subject, "text", disabled),
        message = escape(&draft.message),
    )
}

pub fn footer(content: &Portfolio) -> String {
    let p = &content.profile;
    let links: String = SECTION_LINKS
        .iter()
        .map(|(anchor, label)| format!(r##"<a href="/#{anchor}">{label}</a>"##))
        .collect();
    format!(
        r#"<footer>
<p style="font-size:20px;font-weight:700;color:#fff">{name}</p>
<p style="margin:8px 0 16px">{blurb}</p>
<p>{links}</p>
<p style="margin-top:16px"><a href="mailto:{email}">{email}</a> · {phone}</p>
<p class="meta" style="margin-top:16px">&copy; {year} {name}. All rights reserved.</p>
</footer>"#,
        name = escape(&p.name),
        blurb = escape(&p.footer_blurb),
        email = escape(&p.email),
        phone = escape(&p.phone),
        year = Utc::now().year(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContactFormDraft;

    fn content() -> Portfolio {
        Portfolio::embedded().unwrap()
    }

    #[test]
    fn test_static_sections_reproduce_content() {
        let content = content();

        let hero = hero(&content);
        assert!(hero.contains("Mano Chandran"));
        assert!(hero.contains("Full-Stack Web Developer"));

        let about = about(&content);
        assert!(about.contains("Coimbatore"));
        assert!(about.contains("Responsive Design"));

        let projects = projects(&content);
        assert!(projects.contains(r#"id="project-medication-tracker""#));
        assert!(projects.contains(r#"id="project-ecommerce-website""#));

        let skills = skills(&content);
        assert_eq!(skills.matches(r#"data-color="#).count(), 5);

        let education = education(&content);
        assert_eq!(education.matches(r#"data-kind="#).count(), 3);

        let footer = footer(&content);
        assert!(footer.contains(&Utc::now().year().to_string()));
    }

    #[test]
    fn test_contact_form_idle() {
        let content = content();
        let state = FormState::default();

        let html = contact(&content, &state);
        assert!(html.contains(r#"<form class="card" method="post""#));
        assert!(html.contains("Send Message</button>"));
        assert!(!html.contains(" disabled"));
        assert!(!html.contains("banner error"));
        assert_eq!(html.matches(" required").count(), 4);
    }

    #[test]
    fn test_contact_form_submitting_is_disabled() {
        let content = content();
        let state = FormState {
            draft: ContactFormDraft::new("A", "a@x.com", "S", "M"),
            status: FormStatus::Submitting,
            error: None,
        };

        let html = contact(&content, &state);
        assert!(html.contains("Sending..."));
        assert_eq!(html.matches(" disabled").count(), 5);
    }

    #[test]
    fn test_contact_form_keeps_escaped_draft_and_error() {
        let content = content();
        let state = FormState {
            draft: ContactFormDraft::new("<b>Eve</b>", "e@x.com", "S", "a \"quoted\" body"),
            status: FormStatus::Idle,
            error: Some("Failed to send message.".to_string()),
        };

        let html = contact(&content, &state);
        assert!(html.contains(r#"value="&lt;b&gt;Eve&lt;/b&gt;""#));
        assert!(html.contains("a &quot;quoted&quot; body</textarea>"));
        assert!(html.contains("Failed to send message."));
        assert!(!html.contains("<b>Eve</b>"));
    }

    #[test]
    fn test_contact_submitted_panel() {
        let content = content();
        let state = FormState {
            status: FormStatus::Submitted,
            ..FormState::default()
        };

        let html = contact(&content, &state);
        assert!(html.contains("Message Sent!"));
        assert!(!html.contains("<form"));
    }
}
