//! Text rendering for terminal output.

use certview_client::views::{GalleryRow, HomeCounters};
use certview_core::Certificate;

/// One line per gallery row: name, srn, event, achievement and link.
pub fn gallery_line(row: &GalleryRow<'_>) -> String {
    let mut line = format!("{}\tSRN: {}\t{}", row.student_name, row.srn, row.event);
    if let Some(achievement) = row.achievement {
        line.push('\t');
        line.push_str(achievement);
    }
    if let Some(link) = &row.link {
        line.push('\t');
        line.push_str(link);
    }
    line
}

/// A multi-line description of a single certificate.
pub fn certificate_block(certificate: &Certificate) -> String {
    let mut lines = vec![
        format!(
            "Student:     {}",
            certificate.student_name.as_deref().unwrap_or("N/A")
        ),
        format!("SRN:         {}", certificate.srn),
        format!("Event:       {}", certificate.event),
    ];
    if let Some(achievement) = &certificate.achievement {
        lines.push(format!("Achievement: {achievement}"));
    }
    if let Some(date) = &certificate.date {
        lines.push(format!("Issued:      {}", date.format("%Y-%m-%d")));
    }
    if let Some(description) = &certificate.project_description {
        lines.push(format!("Project:     {description}"));
    }
    lines.push(format!("Image:       {}", certificate.image_url));
    lines.join("\n")
}

/// The home counters, one per line.
pub fn counters_block(counters: &HomeCounters) -> String {
    counters
        .entries()
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
