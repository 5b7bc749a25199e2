//! In-memory workbook archives for the integration tests.
#![allow(dead_code)]

use std::io::Cursor;
use std::io::Write;
use terp_sheet::spreadsheet::reference::index_to_reference;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

pub type Grid<'a> = Vec<Vec<&'a str>>;

/// Cells starting with `#` are error values, cells that parse as numbers are numeric,
/// empty cells are left out and everything else is text.
pub fn xlsx(sheets: &[(&str, Grid)]) -> Vec<u8> {
    let mut shared_strings = Vec::<String>::new();
    let mut worksheets = Vec::new();
    for (_, grid) in sheets {
        let mut xml = String::from(r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#);
        for (row, cells) in grid.iter().enumerate() {
            xml.push_str(&format!(r#"<row r="{}">"#, row + 1));
            for (col, cell) in cells.iter().enumerate() {
                let reference = index_to_reference(row, col);
                if cell.is_empty() {
                    continue;
                } else if cell.starts_with('#') {
                    xml.push_str(&format!(r#"<c r="{}" t="e"><v>{}</v></c>"#, reference, escape(cell)));
                } else if cell.parse::<f64>().is_ok() {
                    xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, cell));
                } else {
                    let index = match shared_strings.iter().position(|text| text == cell) {
                        Some(index) => index,
                        None => {
                            shared_strings.push(cell.to_string());
                            shared_strings.len() - 1
                        }
                    };
                    xml.push_str(&format!(r#"<c r="{}" t="s"><v>{}</v></c>"#, reference, index));
                }
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData></worksheet>");
        worksheets.push(xml);
    }

    let mut workbook = String::from(
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut relationships = String::from(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
    for (index, (name, _)) in sheets.iter().enumerate() {
        workbook.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape(name),
            index + 1,
            index + 1
        ));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            index + 1,
            index + 1
        ));
    }
    workbook.push_str("</sheets></workbook>");
    relationships.push_str(&format!(
        r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
        sheets.len() + 1
    ));
    relationships.push_str("</Relationships>");

    let mut sst = format!(
        r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">"#,
        shared_strings.len()
    );
    for text in &shared_strings {
        sst.push_str(&format!("<si><t>{}</t></si>", escape(text)));
    }
    sst.push_str("</sst>");

    let mut entries = vec![
        ("xl/workbook.xml".to_owned(), workbook),
        ("xl/_rels/workbook.xml.rels".to_owned(), relationships),
        ("xl/sharedStrings.xml".to_owned(), sst),
    ];
    for (index, xml) in worksheets.into_iter().enumerate() {
        entries.push((format!("xl/worksheets/sheet{}.xml", index + 1), xml));
    }
    archive(&entries)
}

/// Same cell conventions as [`xlsx`]. Trailing rows and columns are padded the way
/// office suites do, with large repeat counts.
pub fn ods(sheets: &[(&str, Grid)]) -> Vec<u8> {
    let mut content = String::from(concat!(
        r#"<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" "#,
        r#"xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" "#,
        r#"xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" "#,
        r#"xmlns:calcext="urn:org:documentfoundation:names:experimental:calc:xmlns:calcext:1.0" "#,
        r#"office:version="1.2"><office:body><office:spreadsheet>"#
    ));
    for (name, grid) in sheets {
        content.push_str(&format!(r#"<table:table table:name="{}">"#, escape(name)));
        for cells in grid {
            content.push_str("<table:table-row>");
            for cell in cells {
                if cell.is_empty() {
                    content.push_str("<table:table-cell/>");
                } else if cell.starts_with('#') {
                    content.push_str(&format!(
                        r#"<table:table-cell office:value-type="string" calcext:value-type="error"><text:p>{}</text:p></table:table-cell>"#,
                        escape(cell)
                    ));
                } else if cell.parse::<f64>().is_ok() {
                    content.push_str(&format!(
                        r#"<table:table-cell office:value-type="float" office:value="{0}" calcext:value-type="float"><text:p>{0}</text:p></table:table-cell>"#,
                        cell
                    ));
                } else {
                    content.push_str(&format!(
                        r#"<table:table-cell office:value-type="string" calcext:value-type="string"><text:p>{}</text:p></table:table-cell>"#,
                        escape(cell)
                    ));
                }
            }
            content.push_str(r#"<table:table-cell table:number-columns-repeated="1000"/></table:table-row>"#);
        }
        content.push_str(concat!(
            r#"<table:table-row table:number-rows-repeated="1048000">"#,
            r#"<table:table-cell table:number-columns-repeated="1024"/></table:table-row>"#,
            "</table:table>"
        ));
    }
    content.push_str("</office:spreadsheet></office:body></office:document-content>");
    ods_archive(content, None)
}

/// An ODS archive with the given `content.xml` and, optionally, `META-INF/manifest.xml`.
pub fn ods_archive(content: String, manifest: Option<String>) -> Vec<u8> {
    let mut entries = vec![
        ("mimetype".to_owned(), "application/vnd.oasis.opendocument.spreadsheet".to_owned()),
        ("content.xml".to_owned(), content),
    ];
    if let Some(manifest) = manifest {
        entries.push(("META-INF/manifest.xml".to_owned(), manifest));
    }
    archive(&entries)
}

pub fn archive(entries: &[(String, String)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        let options = if name == "mimetype" {
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
        } else {
            SimpleFileOptions::default()
        };
        writer.start_file(name.as_str(), options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

/// A lab sheet with three banner rows above the header at index 3.
pub fn lab_results() -> Grid<'static> {
    vec![
        vec!["Terpene Lab Results"],
        vec!["Exported 2024-05-01", "", "Example Labs"],
        vec![],
        vec!["Product", "Location", "Category", "Room", "THC", "BetaCaryphyllene", "Limonene", "Linalool"],
        vec!["OG Kush 3.5g", "Downtown", "Flower", "A", "22.9%", "1.10%", "", ""],
        vec!["Live Resin Sauce", "Downtown", "Sauce Cartridge", "B", "750 mg/g", "0.4%", "0.6%", ""],
        vec!["", "Uptown", "Flower", "A", "19%", "0.5%", "", ""],
        vec!["Gummies", "Uptown", "Edible", "C", "1%", "", "", ""],
        vec!["Blue Dream", "Uptown", "flower", "A", "18.5", "0.6%", "0.9%", "12 mg/g"],
        vec!["Wedding Cake Budder", "Uptown", "Budder", "D", "71.3%", "#N/A", "0.3%", ""],
    ]
}
