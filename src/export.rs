use std::io::Write;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{Direction, Month, Report};

/// Writes the wide summary table as a headered CSV artifact: two group-key
/// columns, the twelve month columns in calendar order, and the annual
/// total.
pub fn write_summary_csv<W: Write>(report: &Report, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    let mut header = vec!["Document Type".to_string(), "Direction".to_string()];
    header.extend(Month::ALL.iter().map(|m| m.name().to_string()));
    header.push("Annual Total".to_string());
    writer.write_record(&header)?;

    for row in &report.aggregates {
        let mut record = vec![row.document_type.clone(), row.direction.name().to_string()];
        record.extend(row.months.iter().map(|value| format_amount(*value)));
        record.push(format_amount(row.annual_total));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    debug!("Wrote summary CSV: {} rows", report.aggregates.len());
    Ok(())
}

/// Integral sums (the rounded-Base basis) print without a fraction;
/// raw-tax sums keep two decimals.
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

/// One bar of a percentage panel, label preformatted for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageBar {
    pub month: Month,
    pub percent: f64,
    pub label: String,
}

/// One direction's percentage breakdown on a document-type page. Panels
/// for buckets without a percentage row (zero annual total) carry no bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionPanel {
    pub direction: Direction,
    pub bars: Vec<PercentageBar>,
}

/// One page per document type: two panels, Issued then Received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTypePage {
    pub document_type: String,
    pub panels: Vec<DirectionPanel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: Month,
    pub total: f64,
}

/// Complete data for rendering the multi-page chart document: the monthly
/// trend first, then one percentage page per document type. Plain data
/// built from a finished report; rendering is a separate consumer and no
/// figure state is shared with the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDocument {
    pub trend: Vec<TrendPoint>,
    pub pages: Vec<DocumentTypePage>,
}

impl ChartDocument {
    pub fn from_report(report: &Report) -> Self {
        let trend = Month::ALL
            .iter()
            .map(|&month| TrendPoint {
                month,
                total: report.series.total_for(month),
            })
            .collect();

        // Page order follows aggregate row order, which preserves the
        // document types' first-occurrence order.
        let mut pages: Vec<DocumentTypePage> = Vec::new();
        for aggregate in &report.aggregates {
            if !pages
                .iter()
                .any(|p| p.document_type == aggregate.document_type)
            {
                pages.push(DocumentTypePage {
                    document_type: aggregate.document_type.clone(),
                    panels: Direction::ALL
                        .iter()
                        .map(|&direction| DirectionPanel {
                            direction,
                            bars: Vec::new(),
                        })
                        .collect(),
                });
            }
        }

        for row in &report.percentages {
            let Some(page) = pages
                .iter_mut()
                .find(|p| p.document_type == row.document_type)
            else {
                continue;
            };
            let Some(panel) = page
                .panels
                .iter_mut()
                .find(|panel| panel.direction == row.direction)
            else {
                continue;
            };
            panel.bars = Month::ALL
                .iter()
                .map(|&month| {
                    let percent = row.share(month);
                    PercentageBar {
                        month,
                        percent,
                        label: format!("{percent:.1}%"),
                    }
                })
                .collect();
        }

        Self { trend, pages }
    }
}

/// Serializes the chart document as pretty JSON for the rendering sink.
pub fn write_chart_document<W: Write>(document: &ChartDocument, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.write_all(b"\n")?;
    debug!("Wrote chart document: {} pages", document.pages.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AggregateRow, MonthlySeries, PercentageRow, Warnings};

    fn sample_report() -> Report {
        let mut months = [0.0; 12];
        months[Month::January.index()] = 100.0;
        months[Month::February.index()] = 50.0;

        let mut shares = [0.0; 12];
        shares[Month::January.index()] = 200.0 / 3.0;
        shares[Month::February.index()] = 100.0 / 3.0;

        Report {
            aggregates: vec![
                AggregateRow {
                    document_type: "Invoice".to_string(),
                    direction: Direction::Issued,
                    months,
                    annual_total: 150.0,
                },
                AggregateRow {
                    document_type: "Invoice".to_string(),
                    direction: Direction::Received,
                    months: [0.0; 12],
                    annual_total: 0.0,
                },
            ],
            percentages: vec![PercentageRow {
                document_type: "Invoice".to_string(),
                direction: Direction::Issued,
                shares,
            }],
            series: MonthlySeries { totals: months },
            warnings: Warnings {
                zero_total_groups: 1,
                ..Warnings::default()
            },
        }
    }

    #[test]
    fn test_summary_csv_layout() {
        let mut buffer = Vec::new();
        write_summary_csv(&sample_report(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Document Type,Direction,January,February,March,April,May,June,July,\
             August,September,October,November,December,Annual Total"
        );
        assert_eq!(
            lines[1],
            "Invoice,Issued,100,50,0,0,0,0,0,0,0,0,0,0,150"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_amount_formatting() {
        assert_eq!(format_amount(150.0), "150");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(100.6), "100.60");
    }

    #[test]
    fn test_chart_document_structure() {
        let document = ChartDocument::from_report(&sample_report());

        assert_eq!(document.trend.len(), 12);
        assert_eq!(document.trend[0].month, Month::January);
        assert_eq!(document.trend[0].total, 100.0);

        assert_eq!(document.pages.len(), 1);
        let page = &document.pages[0];
        assert_eq!(page.document_type, "Invoice");
        assert_eq!(page.panels.len(), 2);
        assert_eq!(page.panels[0].direction, Direction::Issued);
        assert_eq!(page.panels[0].bars.len(), 12);
        assert_eq!(page.panels[0].bars[0].label, "66.7%");

        // zero-total bucket renders as an empty panel, not a crash
        assert_eq!(page.panels[1].direction, Direction::Received);
        assert!(page.panels[1].bars.is_empty());
    }

    #[test]
    fn test_chart_document_serializes() {
        let document = ChartDocument::from_report(&sample_report());
        let mut buffer = Vec::new();
        write_chart_document(&document, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"January\""));
        assert!(text.contains("66.7%"));
    }
}
