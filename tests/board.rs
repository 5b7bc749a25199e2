mod support;

use support::lab_results;
use terp_sheet::Board;
use terp_sheet::Category;
use terp_sheet::Column;
use terp_sheet::Config;
use terp_sheet::IngestError;
use terp_sheet::Terpene;

fn flower_sheet(count: usize) -> Vec<u8> {
    let products: Vec<String> = (0..count).map(|index| format!("Strain {index:02}")).collect();
    let terpenes: Vec<String> = (0..count).map(|index| format!("{}%", index as f64 / 10.0)).collect();
    let mut grid = vec![vec!["Product", "Category", "Room", "THC", "Limonene"]];
    for (product, terpene) in products.iter().zip(&terpenes) {
        grid.push(vec![product.as_str(), "Flower", "A", "20%", terpene.as_str()]);
    }
    support::xlsx(&[("Lab", grid)])
}

#[test]
fn pages_of_ten() {
    let mut board = Board::new(Config::default());
    board.load(flower_sheet(25)).unwrap();
    assert_eq!(board.status().to_string(), "raw: 25 • included: 25 • showing: Flower • rows: 25");

    let pages: Vec<(usize, bool)> = (0..3)
        .map(|_| {
            let page = board.next_page();
            (page.rows.len(), page.has_more)
        })
        .collect();
    assert_eq!(pages, vec![(10, true), (10, true), (5, false)]);

    let page = board.next_page();
    assert!(page.rows.is_empty());
    assert!(!page.has_more);
    assert_eq!(board.view().visible().len(), 25);

    // highest limonene first
    assert_eq!(board.view().visible()[0].product(), "Strain 24");
    assert_eq!(board.view().visible()[24].product(), "Strain 00");
}

#[test]
fn sort_and_search_reset_the_cursor() {
    let mut board = Board::new(Config {
        page_size: 4,
        ..Config::default()
    });
    board.load(flower_sheet(12)).unwrap();
    board.next_page();
    board.next_page();
    assert_eq!(board.view().rows_shown(), 8);

    board.sort_by(Column::Terpene(Terpene::Limonene));
    assert_eq!(board.view().rows_shown(), 0);
    assert_eq!(board.sort_indicator(Column::Terpene(Terpene::Limonene)), Some("▼"));
    assert_eq!(board.next_page().rows[0].product(), "Strain 11");

    board.sort_by(Column::Terpene(Terpene::Limonene));
    assert_eq!(board.sort_indicator(Column::Terpene(Terpene::Limonene)), Some("▲"));
    assert_eq!(board.next_page().rows[0].product(), "Strain 00");

    board.set_search("strain 1");
    assert_eq!(board.view().len(), 2);
    assert_eq!(board.status().search.as_deref(), Some("strain 1"));
}

#[test]
fn new_file_resets_the_query() {
    let mut board = Board::new(Config::default());
    board.load(flower_sheet(3)).unwrap();
    board.select_category(Category::Vape);
    board.set_search("kush");
    board.sort_by(Column::Product);

    board.load(support::ods(&[("Lab", lab_results())])).unwrap();
    assert_eq!(board.spec().category, Category::Flower);
    assert_eq!(board.spec().search_text, "");
    assert_eq!(board.spec().sort, None);
    assert_eq!(
        board.status().to_string(),
        "raw: 6 • included: 4 • showing: Flower • rows: 2"
    );
    let page = board.next_page();
    assert_eq!(page.rows[0].product(), "Blue Dream");
    assert_eq!(page.rows[1].product(), "OG Kush 3.5g");
}

#[test]
fn failed_load_keeps_the_board() {
    let mut board = Board::new(Config::default());
    board.load(support::xlsx(&[("Lab", lab_results())])).unwrap();
    board.select_category(Category::Concentrate);

    let no_header = support::xlsx(&[("Lab", vec![vec!["Item", "THC"], vec!["Kush", "20%"]])]);
    assert!(matches!(board.load(no_header), Err(IngestError::HeaderNotFound { .. })));
    assert!(board.load(b"garbage".to_vec()).is_err());

    assert_eq!(board.dataset().map(|dataset| dataset.len()), Some(4));
    assert_eq!(board.spec().category, Category::Concentrate);
    assert_eq!(board.view().len(), 1);
    assert_eq!(board.view().rows()[0].product(), "Wedding Cake Budder");
}
