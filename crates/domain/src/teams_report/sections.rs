/// The three row sections a Teams attendance export is sliced into.
/// `participants` and `activities` start with their header row when one was
/// found. Sections that never appear stay empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSections {
    pub meeting_info: Vec<Vec<String>>,
    pub participants: Vec<Vec<String>>,
    pub activities: Vec<Vec<String>>,
}

const HEADER_LOOKAHEAD: usize = 10;

fn row_text(row: &[String]) -> String {
    row.join(" ").to_lowercase()
}

fn first_cell(row: &[String]) -> String {
    row.first().map(|c| c.to_lowercase()).unwrap_or_default()
}

fn is_empty_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

fn find_header_row(grid: &[Vec<String>], from: usize, needles: &[&str]) -> Option<usize> {
    let until = (from + HEADER_LOOKAHEAD + 1).min(grid.len());
    (from..until).find(|&idx| {
        let text = row_text(&grid[idx]);
        needles.iter().any(|needle| text.contains(needle))
    })
}

/// Slices a raw report grid into its sections with one forward keyword scan.
/// Row classification works on lowercased cell text, so exports with varying
/// casing and numbering ("2. Participants", "Participants") all land. Never
/// fails: a grid with no recognizable structure yields empty sections.
pub fn detect_sections(grid: &[Vec<String>]) -> ReportSections {
    let mut meeting_start: Option<usize> = None;
    let mut participants_title: Option<usize> = None;
    let mut participants_header: Option<usize> = None;
    let mut activities_title: Option<usize> = None;
    let mut activities_header: Option<usize> = None;

    for (idx, row) in grid.iter().enumerate() {
        if is_empty_row(row) {
            continue;
        }
        let text = row_text(row);
        let first = first_cell(row);

        if participants_header.is_none()
            && (text.contains("full name")
                || first.contains("participant")
                || text.contains("attendee"))
        {
            participants_title = Some(idx);
            participants_header =
                Some(find_header_row(grid, idx, &["join", "email", "duration", "role"])
                    .unwrap_or(idx));
            continue;
        }

        if participants_header.is_some()
            && activities_header.is_none()
            && (first.contains("activities") || first.contains("action"))
        {
            activities_title = Some(idx);
            activities_header =
                Some(find_header_row(grid, idx, &["action", "timestamp", "joined", "left"])
                    .unwrap_or(idx));
            continue;
        }

        if meeting_start.is_none()
            && participants_header.is_none()
            && (text.contains("summary") || text.contains("meeting"))
        {
            meeting_start = Some(idx);
        }
    }

    // No participants keyword anywhere: fall back to the first row that looks
    // like attendance data and is not part of the meeting header block.
    if participants_header.is_none() {
        participants_header = grid.iter().position(|row| {
            if is_empty_row(row) {
                return false;
            }
            let text = row_text(row);
            let looks_like_data =
                text.contains('@') || text.contains("join") || text.contains("leave");
            looks_like_data && !text.contains("summary") && !text.contains("meeting")
        });
    }

    let meeting_end = participants_title
        .or(participants_header)
        .or(activities_title)
        .unwrap_or(grid.len());
    let participants_end = activities_title.unwrap_or(grid.len());

    let mut sections = ReportSections::default();
    if let Some(start) = meeting_start {
        sections.meeting_info = grid[start..meeting_end.max(start)].to_vec();
    }
    if let Some(start) = participants_header {
        sections.participants = grid[start..participants_end.max(start)].to_vec();
    }
    if let Some(start) = activities_header {
        sections.activities = grid[start..].to_vec();
    }
    sections
}

#[cfg(test)]
mod test {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn detects_titled_sections() {
        let grid = vec![
            row(&["1. Summary"]),
            row(&["Meeting title", "Rust workshop"]),
            row(&["Meeting duration", "45m 7s"]),
            row(&[]),
            row(&["2. Participants"]),
            row(&["Name", "First Join", "Last Leave", "Email", "Role"]),
            row(&["Ada Lovelace", "5/15/2023, 10:00:00 AM", "5/15/2023, 10:45:00 AM", "ada@example.com", "Presenter"]),
            row(&[]),
            row(&["3. In-Meeting Activities"]),
            row(&["Name", "Action", "Timestamp", "Email"]),
            row(&["Ada Lovelace", "Joined", "5/15/2023, 10:00:00 AM", "ada@example.com"]),
        ];
        let sections = detect_sections(&grid);
        assert_eq!(sections.meeting_info.len(), 4);
        assert_eq!(sections.meeting_info[0][0], "1. Summary");
        assert_eq!(sections.participants.len(), 3);
        assert_eq!(sections.participants[0][0], "Name");
        assert_eq!(sections.activities.len(), 2);
        assert_eq!(sections.activities[0][1], "Action");
    }

    #[test]
    fn header_lookahead_skips_blank_rows() {
        let grid = vec![
            row(&["Participants"]),
            row(&[]),
            row(&[]),
            row(&["Full Name", "Email", "Duration"]),
            row(&["Ada Lovelace", "ada@example.com", "45m"]),
        ];
        let sections = detect_sections(&grid);
        assert_eq!(sections.participants.len(), 2);
        assert_eq!(sections.participants[0][0], "Full Name");
    }

    #[test]
    fn minimal_grid_without_numbered_titles() {
        let grid = vec![
            row(&["Meeting Duration", "45m 7s"]),
            row(&["3. Participants"]),
            row(&["Name", "Join time", "Leave time"]),
            row(&["Ada Lovelace", "5/15/2023, 10:00:00 AM", "5/15/2023, 10:45:00 AM"]),
        ];
        let sections = detect_sections(&grid);
        assert_eq!(sections.meeting_info, vec![row(&["Meeting Duration", "45m 7s"])]);
        assert_eq!(sections.participants.len(), 2);
        assert_eq!(sections.participants[0][0], "Name");
        assert!(sections.activities.is_empty());
    }

    #[test]
    fn falls_back_to_first_data_looking_row() {
        let grid = vec![
            row(&["Some export"]),
            row(&["Ada Lovelace", "ada@example.com", "45"]),
            row(&["Grace Hopper", "grace@example.com", "50"]),
        ];
        let sections = detect_sections(&grid);
        assert_eq!(sections.participants.len(), 2);
        assert_eq!(sections.participants[0][1], "ada@example.com");
    }

    #[test]
    fn empty_grid_yields_empty_sections() {
        assert_eq!(detect_sections(&[]), ReportSections::default());
        let blank = vec![row(&["", ""]), row(&[])];
        assert_eq!(detect_sections(&blank), ReportSections::default());
    }
}
