//! Subject report rendering.
//!
//! A report is one subject's records plus the teacher's name, rendered to a
//! self-contained HTML page that the export pipeline converts to PDF.
//! Rendering is pure: identical input gives byte-identical output. Every
//! interpolated value is HTML-escaped.

use chrono::{Datelike, NaiveDate};

use super::aggregation::SubjectRecordGroup;
use super::teaching_record::{Grade, Period};

/// Placeholder for an absent grade or teacher name.
pub const NOT_AVAILABLE: &str = "N/A";

/// Short date layouts used in report tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    /// `7/15/2024`
    #[default]
    MonthFirst,
    /// `15/07/2024`
    DayFirst,
    /// `2024/07/15`
    YearFirst,
}

const MONTH_FIRST_REGIONS: [&str; 11] = [
    "US", "PH", "FM", "MH", "PW", "AS", "GU", "MP", "PR", "VI", "UM",
];
const YEAR_FIRST_LANGUAGES: [&str; 6] = ["ja", "zh", "ko", "hu", "lt", "mn"];

impl DateStyle {
    /// Pick a layout from a POSIX or BCP 47 locale tag such as
    /// `en_US.UTF-8` or `en-GB`. Unknown or neutral tags (`C`, `POSIX`)
    /// fall back to month-first.
    ///
    /// # Examples
    /// ```
    /// use teaching_buddy::domain::DateStyle;
    ///
    /// assert_eq!(DateStyle::for_locale("en_GB.UTF-8"), DateStyle::DayFirst);
    /// assert_eq!(DateStyle::for_locale("ja-JP"), DateStyle::YearFirst);
    /// assert_eq!(DateStyle::for_locale("C"), DateStyle::MonthFirst);
    /// ```
    #[must_use]
    pub fn for_locale(tag: &str) -> Self {
        let base = tag
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        let mut parts = base.split(['_', '-']);
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let region = parts
            .find(|part| part.len() == 2 || part.len() == 3)
            .map(str::to_ascii_uppercase);

        if language.is_empty() || language == "c" || language == "posix" {
            return Self::MonthFirst;
        }
        if YEAR_FIRST_LANGUAGES.contains(&language.as_str()) {
            return Self::YearFirst;
        }
        match region.as_deref() {
            Some(region) if MONTH_FIRST_REGIONS.contains(&region) => Self::MonthFirst,
            Some(_) => Self::DayFirst,
            None if language == "en" => Self::MonthFirst,
            None => Self::DayFirst,
        }
    }

    /// Format `date` in this layout.
    #[must_use]
    pub fn format(self, date: NaiveDate) -> String {
        let (year, month, day) = (date.year(), date.month(), date.day());
        match self {
            Self::MonthFirst => format!("{month}/{day}/{year}"),
            Self::DayFirst => format!("{day:02}/{month:02}/{year}"),
            Self::YearFirst => format!("{year}/{month:02}/{day:02}"),
        }
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub period: Period,
    pub description: String,
    pub grade: Option<Grade>,
}

/// Everything a subject report shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportData {
    pub teacher_name: String,
    pub subject_name: String,
    /// Rows in display order.
    pub rows: Vec<ReportRow>,
}

impl ReportData {
    /// Report for one aggregated subject group, rows in group order.
    #[must_use]
    pub fn from_group(teacher_name: &str, group: &SubjectRecordGroup) -> Self {
        Self {
            teacher_name: teacher_name.to_owned(),
            subject_name: group.subject_name().to_owned(),
            rows: group
                .records()
                .iter()
                .map(|record| ReportRow {
                    date: record.date(),
                    period: record.period(),
                    description: record.description().to_owned(),
                    grade: record.grade().cloned(),
                })
                .collect(),
        }
    }
}

/// Rendered HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport(String);

impl RenderedReport {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for RenderedReport {
    fn from(html: String) -> Self {
        Self(html)
    }
}

/// Escape text for use in HTML element content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// File name for a subject's PDF: `SubjectReport-<subject>.pdf` with each
/// whitespace run, path separator and NUL replaced by `_`.
///
/// # Examples
/// ```
/// use teaching_buddy::domain::report_file_name;
///
/// assert_eq!(report_file_name("Social  Studies"), "SubjectReport-Social_Studies.pdf");
/// ```
#[must_use]
pub fn report_file_name(subject_name: &str) -> String {
    let mut name = String::from("SubjectReport-");
    let mut in_whitespace = false;
    for ch in subject_name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else if matches!(ch, '/' | '\\' | '\0') {
            name.push('_');
            in_whitespace = false;
        } else {
            name.push(ch);
            in_whitespace = false;
        }
    }
    name.push_str(".pdf");
    name
}

/// Title for the share dialog.
#[must_use]
pub fn share_dialog_title(subject_name: &str) -> String {
    format!("Share {subject_name} Report")
}

const STYLE: &str = r"
      body {
        font-family: Arial, sans-serif;
        padding: 20px;
        background-color: #f4f4f4;
        color: #333;
      }
      .header {
        margin-bottom: 20px;
        text-align: center;
      }
      .header h1 {
        margin: 0;
        font-size: 22px;
        color: #2c3e50;
      }
      .header h3 {
        margin: 5px 0;
        font-size: 18px;
        color: #2c3e50;
      }
      .header p {
        margin: 5px 0;
        font-size: 16px;
        color: #555;
      }
      table {
        width: 100%;
        border-collapse: collapse;
        background-color: #fff;
        box-shadow: 0 0 10px rgba(0,0,0,0.05);
      }
      th, td {
        padding: 10px;
        border: 1px solid #ddd;
        text-align: left;
        font-size: 12px;
      }
      th {
        background-color: #2c3e50;
        color: white;
        font-size: 14px;
      }
      tr:nth-child(even) {
        background-color: #f9f9f9;
      }
";

fn or_not_available(text: &str) -> &str {
    if text.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        text
    }
}

fn render_row(number: usize, row: &ReportRow, style: DateStyle) -> String {
    let grade = row.grade.as_ref().map_or(NOT_AVAILABLE, AsRef::as_ref);
    format!(
        "        <tr>\n          <td>{number}</td>\n          <td>{date}</td>\n          \
         <td>{period}</td>\n          <td>{description}</td>\n          <td>{grade}</td>\n        \
         </tr>\n",
        date = escape_html(&style.format(row.date)),
        period = row.period,
        description = escape_html(&row.description),
        grade = escape_html(grade),
    )
}

/// Render a subject report to HTML.
#[must_use]
pub fn render_report_html(data: &ReportData, style: DateStyle) -> RenderedReport {
    let rows: String = data
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| render_row(index + 1, row, style))
        .collect();
    let teacher = escape_html(or_not_available(&data.teacher_name));
    let subject = escape_html(&data.subject_name);

    RenderedReport(format!(
        "<!DOCTYPE html>
<html>
  <head>
    <meta charset=\"utf-8\">
    <title>{subject} Report</title>
    <style>{STYLE}    </style>
  </head>
  <body>
    <div class=\"header\">
      <h1>Teacher: {teacher}</h1>
      <h3>Subject Report</h3>
      <p>Subject: {subject}</p>
    </div>
    <table>
      <thead>
        <tr>
          <th>#</th>
          <th>Date</th>
          <th>Period</th>
          <th>Description</th>
          <th>Grade</th>
        </tr>
      </thead>
      <tbody>
{rows}      </tbody>
    </table>
  </body>
</html>
"
    ))
}

#[cfg(test)]
mod tests {
    //! Rendering, escaping and naming rules.
    use rstest::{fixture, rstest};

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn row(day: u32, period: u8, description: &str, grade: Option<&str>) -> ReportRow {
        ReportRow {
            date: date(2024, 7, day),
            period: Period::new(period).expect("period"),
            description: description.to_owned(),
            grade: grade.and_then(Grade::from_text),
        }
    }

    #[fixture]
    fn maths() -> ReportData {
        ReportData {
            teacher_name: "John Doe".to_owned(),
            subject_name: "Mathematics".to_owned(),
            rows: vec![
                row(16, 3, "Fractions", Some("A")),
                row(15, 1, "Introduction to Algebra", None),
            ],
        }
    }

    #[rstest]
    fn header_names_teacher_and_subject(maths: ReportData) {
        let html = render_report_html(&maths, DateStyle::MonthFirst);
        assert!(html.as_str().contains("<h1>Teacher: John Doe</h1>"));
        assert!(html.as_str().contains("<h3>Subject Report</h3>"));
        assert!(html.as_str().contains("<p>Subject: Mathematics</p>"));
    }

    #[rstest]
    fn rows_are_numbered_in_order(maths: ReportData) {
        let html = render_report_html(&maths, DateStyle::MonthFirst).into_string();
        let first = html.find("<td>1</td>").expect("row 1");
        let second = html.find("<td>2</td>").expect("row 2");
        assert!(first < second);
        assert!(html.find("Fractions") < html.find("Introduction to Algebra"));
        assert!(html.contains("<td>7/16/2024</td>"));
    }

    #[rstest]
    fn missing_grade_renders_placeholder(maths: ReportData) {
        let html = render_report_html(&maths, DateStyle::MonthFirst).into_string();
        assert!(html.contains("<td>A</td>"));
        assert!(html.contains("<td>N/A</td>"));
    }

    #[rstest]
    fn blank_teacher_name_renders_placeholder(mut maths: ReportData) {
        maths.teacher_name = "  ".to_owned();
        let html = render_report_html(&maths, DateStyle::MonthFirst).into_string();
        assert!(html.contains("<h1>Teacher: N/A</h1>"));
    }

    #[rstest]
    fn rendering_is_deterministic(maths: ReportData) {
        assert_eq!(
            render_report_html(&maths, DateStyle::DayFirst),
            render_report_html(&maths, DateStyle::DayFirst)
        );
    }

    #[rstest]
    fn markup_in_values_is_escaped(mut maths: ReportData) {
        maths.teacher_name = "<script>alert('x')</script>".to_owned();
        maths.rows[0].description = "Tom & Jerry say \"hi\"".to_owned();
        let html = render_report_html(&maths, DateStyle::MonthFirst).into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("Tom &amp; Jerry say &quot;hi&quot;"));
    }

    #[test]
    fn empty_report_has_header_and_empty_body() {
        let data = ReportData {
            teacher_name: "Jane Smith".to_owned(),
            subject_name: "Art".to_owned(),
            rows: Vec::new(),
        };
        let html = render_report_html(&data, DateStyle::MonthFirst).into_string();
        assert!(html.contains("<tbody>\n      </tbody>"));
    }

    #[rstest]
    #[case(DateStyle::MonthFirst, "7/5/2024")]
    #[case(DateStyle::DayFirst, "05/07/2024")]
    #[case(DateStyle::YearFirst, "2024/07/05")]
    fn date_styles(#[case] style: DateStyle, #[case] expected: &str) {
        assert_eq!(style.format(date(2024, 7, 5)), expected);
    }

    #[rstest]
    #[case("en_US.UTF-8", DateStyle::MonthFirst)]
    #[case("en", DateStyle::MonthFirst)]
    #[case("", DateStyle::MonthFirst)]
    #[case("POSIX", DateStyle::MonthFirst)]
    #[case("en_GB.UTF-8", DateStyle::DayFirst)]
    #[case("de-DE", DateStyle::DayFirst)]
    #[case("fr", DateStyle::DayFirst)]
    #[case("zh_CN.UTF-8", DateStyle::YearFirst)]
    #[case("ko-KR", DateStyle::YearFirst)]
    #[case("es-US", DateStyle::MonthFirst)]
    fn locale_tags(#[case] tag: &str, #[case] expected: DateStyle) {
        assert_eq!(DateStyle::for_locale(tag), expected);
    }

    #[rstest]
    #[case("Mathematics", "SubjectReport-Mathematics.pdf")]
    #[case("Social Studies", "SubjectReport-Social_Studies.pdf")]
    #[case("Social \t\n Studies", "SubjectReport-Social_Studies.pdf")]
    #[case(" Art ", "SubjectReport-_Art_.pdf")]
    #[case("Arts/Crafts", "SubjectReport-Arts_Crafts.pdf")]
    #[case("Arts\\Crafts", "SubjectReport-Arts_Crafts.pdf")]
    #[case("Arts\0Crafts", "SubjectReport-Arts_Crafts.pdf")]
    fn file_names(#[case] subject: &str, #[case] expected: &str) {
        assert_eq!(report_file_name(subject), expected);
    }

    #[test]
    fn share_title_names_subject() {
        assert_eq!(share_dialog_title("Science"), "Share Science Report");
    }
}
