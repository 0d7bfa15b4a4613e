use std::collections::BTreeSet;

use travian_map::data::distance::{Unavailable, distance};
use travian_map::data::filter::{FilterCriteria, filter};
use travian_map::data::loader::parse_csv;
use travian_map::data::model::{Dataset, Point};
use travian_map::prefs::ViewPreferences;
use travian_map::scene::build;

fn scenario() -> Dataset {
    Dataset::from_points(vec![
        Point::new("Oyuncu", "A", 0.0, 0.0),
        Point::new("Oyuncu", "B", 3.0, 4.0),
        Point::new("Hedef", "C", -5.0, -5.0),
    ])
}

fn only(categories: &[&str]) -> FilterCriteria {
    FilterCriteria {
        allowed_categories: categories.iter().map(|c| c.to_string()).collect(),
        name_query: String::new(),
    }
}

#[test]
fn distance_between_players() {
    assert_eq!(distance(&scenario(), "A", "B"), Ok(5.0));
    assert_eq!(distance(&scenario(), "B", "A"), Ok(5.0));
    assert_eq!(distance(&scenario(), "A", "A"), Err(Unavailable::SamePoint));
}

#[test]
fn target_filter_yields_single_group() {
    let visible = filter(&scenario(), &only(&["Hedef"]));
    let scene = build(&visible, &ViewPreferences::default());
    assert_eq!(scene.groups.len(), 1);
    assert_eq!(scene.groups[0].category, "Hedef");
    assert_eq!(scene.groups[0].points, vec![Point::new("Hedef", "C", -5.0, -5.0)]);
}

#[test]
fn distance_ignores_active_filter() {
    let ds = scenario();
    let visible = filter(&ds, &only(&["Hedef"]));
    assert!(visible.find_by_name("A").is_none());
    assert!(distance(&ds, "A", "C").is_ok());
}

#[test]
fn empty_dataset_builds_empty_fixed_scene() {
    let scene = build(&Dataset::default(), &ViewPreferences::default());
    assert!(scene.groups.is_empty());
    assert_eq!(scene.x_range, [-200.0, 200.0]);
    assert_eq!(scene.y_range, [-200.0, 200.0]);
}

#[test]
fn name_search_matches_case_insensitively() {
    let ds = Dataset::from_points(vec![
        Point::new("Oyuncu", "Ab", 1.0, 1.0),
        Point::new("Oyuncu", "ab", 2.0, 2.0),
        Point::new("Oyuncu", "C", 3.0, 3.0),
    ]);
    let criteria = FilterCriteria {
        allowed_categories: BTreeSet::from(["Oyuncu".to_string()]),
        name_query: "b".into(),
    };
    let names: Vec<String> = filter(&ds, &criteria).iter().map(|p| p.name.clone()).collect();
    assert_eq!(names, vec!["Ab", "ab"]);
}

#[test]
fn empty_category_selection_hides_all_for_any_query() {
    for query in ["", "a", "zzz"] {
        let criteria = FilterCriteria {
            allowed_categories: BTreeSet::new(),
            name_query: query.into(),
        };
        assert!(filter(&scenario(), &criteria).is_empty());
    }
}

#[test]
fn sheet_to_scene() {
    let csv = "\
n0,n1,n2,n3,n4,n5,n6,n7,n8,n9,Tip,İsim,X,Y
,,,,,,,,,,Oyuncu,Ali,10,20
,,,,,,,,,,Hedef,Köy,-150,35
,,,,,,,,,,Hedef,bozuk,?,35
,,,,,,,,,,Vaha,Vaha1,0,0
";
    let ds = parse_csv(csv.as_bytes()).unwrap();
    assert_eq!(ds.len(), 3);

    let criteria = FilterCriteria::allow_all(&ds);
    let first = build(&filter(&ds, &criteria), &ViewPreferences::default());
    let second = build(&filter(&ds, &criteria), &ViewPreferences::default());
    assert_eq!(first, second);

    let cats: Vec<&str> = first.groups.iter().map(|g| g.category.as_str()).collect();
    assert_eq!(cats, vec!["Hedef", "Oyuncu", "Vaha"]);
    assert_eq!(first.point_count(), 3);
}
