mod common;

use chrono::NaiveDate;

fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dom).unwrap()
}

#[test]
fn generated_window_feeds_the_projection() {
    let base = common::setup_base();
    let mut manager = common::open_manager(&base);
    let today = day(2025, 8, 20);

    manager.ensure_today(today, day(2025, 8, 1)).unwrap();
    manager.set_target("300").unwrap();

    let status = manager.status();
    assert_eq!(status.total_points, 240);
    assert_eq!(status.target_points, Some(300));
    // The window is saturated at 16/day, so the live total can never grow
    // past 240 and the 300 target is unreachable.
    assert_eq!(status.days_to_target, None);
}

#[test]
fn edits_change_the_projection_deterministically() {
    let base = common::setup_base();
    let mut manager = common::open_manager(&base);
    let today = day(2025, 8, 20);

    manager.ensure_today(today, today).unwrap();
    manager.set_target("40").unwrap();
    assert_eq!(manager.status().total_points, 16);

    // 16 today + 16 on the first simulated day + 16 on the second: >= 40.
    assert_eq!(manager.status().days_to_target, Some(2));

    manager.edit_day(0, 30).unwrap();
    assert_eq!(manager.status().total_points, 30);
    assert_eq!(manager.status().days_to_target, Some(1));

    // Same input twice yields the same answer.
    assert_eq!(manager.status().days_to_target, Some(1));
}

#[test]
fn clearing_the_target_disables_the_projection() {
    let base = common::setup_base();
    let mut manager = common::open_manager(&base);
    manager.ensure_today(day(2025, 8, 20), day(2025, 8, 20)).unwrap();

    manager.set_target("10").unwrap();
    assert_eq!(manager.status().days_to_target, Some(0));

    manager.set_target("").unwrap();
    assert_eq!(manager.status().days_to_target, None);
    assert_eq!(manager.status().target_points, None);
}

#[test]
fn overview_covers_every_account_in_order() {
    let base = common::setup_base();
    let mut manager = common::open_manager(&base);
    let today = day(2025, 8, 20);
    manager.ensure_today(today, today).unwrap();
    manager.set_target("32").unwrap();

    manager.create_account("Side").unwrap();
    manager.ensure_today(today, today).unwrap();
    manager.set_target("not-a-number").unwrap();

    let overview = manager.overview();
    assert_eq!(overview.len(), 2);
    assert_eq!(overview[0].name, "Default");
    assert_eq!(overview[0].total_points, 16);
    assert_eq!(overview[0].points_to_target, Some(16));
    assert_eq!(overview[0].days_to_target, Some(1));

    assert_eq!(overview[1].name, "Side");
    assert_eq!(overview[1].target_points, None);
    assert_eq!(overview[1].progress_percentage, None);
    assert_eq!(overview[1].days_to_target, None);
}
