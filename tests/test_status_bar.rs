use pollo_loco::entities::Drawable;
use pollo_loco::status_bar::{band_for, percentage_of, BarKind, StatusBar};

#[test]
fn bands_follow_the_thresholds() {
    let cases = [
        (100, 5),
        (99, 4),
        (80, 4),
        (79, 3),
        (60, 3),
        (40, 2),
        (39, 1),
        (20, 1),
        (19, 0),
        (0, 0),
    ];
    for (pct, band) in cases {
        assert_eq!(band_for(pct), band, "{}%", pct);
    }
}

#[test]
fn pickup_counts_map_to_percentages() {
    assert_eq!(percentage_of(0, 5), 0);
    assert_eq!(percentage_of(3, 5), 60);
    assert_eq!(percentage_of(5, 5), 100);
    assert_eq!(percentage_of(9, 5), 100);
    assert_eq!(percentage_of(1, 0), 0);
}

#[test]
fn bars_start_full_or_empty() {
    assert_eq!(StatusBar::new(BarKind::Health).percentage(), 100);
    assert_eq!(StatusBar::new(BarKind::Boss).percentage(), 100);
    assert_eq!(StatusBar::new(BarKind::Coins).percentage(), 0);
    assert_eq!(StatusBar::new(BarKind::Bottles).percentage(), 0);
}

#[test]
fn setting_a_percentage_swaps_the_image() {
    let mut bar = StatusBar::new(BarKind::Health);
    bar.set_percentage(45);

    assert_eq!(bar.band(), 2);
    assert_eq!(
        bar.sprite().image_path(),
        Some("img/7_statusbars/1_statusbar/2_statusbar_health/blue/40.png")
    );

    bar.set_percentage(400);
    assert_eq!(bar.percentage(), 100);
}

#[test]
fn bars_sit_at_fixed_screen_positions() {
    let boss = StatusBar::new(BarKind::Boss);
    assert_eq!((boss.sprite.x, boss.sprite.y), (480.0, 0.0));
    assert_eq!((boss.sprite.width, boss.sprite.height), (200.0, 60.0));

    let bottles = StatusBar::new(BarKind::Bottles);
    assert_eq!((bottles.sprite.x, bottles.sprite.y), (40.0, 90.0));
}
