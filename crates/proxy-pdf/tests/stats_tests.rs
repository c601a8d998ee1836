use proxy_pdf::*;

#[test]
fn test_statistics_single_file() {
    let stats = calculate_statistics(20, &ProxyOptions::default()).unwrap();

    assert_eq!(stats.cards, 20);
    assert_eq!(stats.pages, 3);
    assert_eq!(stats.documents, 1);
    assert_eq!(stats.pages_per_document, vec![3]);
    assert_eq!(stats.empty_slots, 7);
}

#[test]
fn test_statistics_split_files() {
    let stats = calculate_statistics(300, &ProxyOptions::default()).unwrap();

    // 300 / 9 -> 34 pages -> 12 + 12 + 10
    assert_eq!(stats.pages, 34);
    assert_eq!(stats.documents, 3);
    assert_eq!(stats.pages_per_document, vec![12, 12, 10]);
    assert_eq!(stats.empty_slots, 6);
}

#[test]
fn test_statistics_full_pages() {
    let options = ProxyOptions {
        columns: 4,
        rows: 2,
        orientation: Orientation::Landscape,
        pages_per_file: 1,
        ..Default::default()
    };
    let stats = calculate_statistics(16, &options).unwrap();

    assert_eq!(stats.pages, 2);
    assert_eq!(stats.documents, 2);
    assert_eq!(stats.pages_per_document, vec![1, 1]);
    assert_eq!(stats.empty_slots, 0);
}

#[test]
fn test_statistics_no_cards() {
    let result = calculate_statistics(0, &ProxyOptions::default());
    assert!(matches!(result, Err(ProxyError::NoImages)));
}

#[test]
fn test_statistics_invalid_options() {
    let options = ProxyOptions {
        rows: 0,
        ..Default::default()
    };
    match calculate_statistics(9, &options) {
        Err(ProxyError::Config(msg)) => assert!(msg.contains("at least one column")),
        _ => panic!("Expected Config error"),
    }
}
