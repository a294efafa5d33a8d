use std::sync::Arc;

use api::theme::{AssetPaths, Palette, Presentation, SeasonId, Theme};

pub mod calendar;
pub mod clock;
pub mod css;
pub mod table;

pub use calendar::{SeasonSpan, season_calendar};
pub use clock::{Clock, FixedClock, LocalClock, UtcClock, clock_for};
pub use css::css_variables;
pub use table::{ThemeTable, load_table};

// seasonal theme resolver
//
// maps "today", as reported by the clock, onto a theme from the table.  it
// holds no mutable state, so one resolver can be shared by every request.
#[derive(Clone, Debug)]
pub struct ThemeResolver {
    table: Arc<ThemeTable>,
    clock: Arc<dyn Clock>,
}

impl ThemeResolver {
    pub fn new(table: Arc<ThemeTable>, clock: Arc<dyn Clock>) -> Self {
        ThemeResolver { table, clock }
    }

    pub fn table(&self) -> &ThemeTable {
        &self.table
    }

    pub fn current_season(&self) -> SeasonId {
        self.table.season_on(self.clock.today())
    }

    // a season missing from the table falls back to the default theme
    pub fn theme(&self, season: Option<SeasonId>) -> &Theme {
        let season = season.unwrap_or_else(|| self.current_season());

        self.table
            .get(season)
            .unwrap_or_else(|| self.table.default_theme())
    }

    pub fn assets(&self, season: Option<SeasonId>) -> &AssetPaths {
        &self.theme(season).assets
    }

    pub fn colors(&self, season: Option<SeasonId>) -> &Palette {
        &self.theme(season).palette
    }

    pub fn presentation(&self, season: Option<SeasonId>) -> &Presentation {
        &self.theme(season).presentation
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate};

    use api::theme::{ActivePeriod, MonthDay};

    use super::*;

    fn resolver_on(year: i32, month: u32, day: u32) -> ThemeResolver {
        resolver_with(ThemeTable::builtin(), year, month, day)
    }

    fn resolver_with(table: ThemeTable, year: i32, month: u32, day: u32) -> ThemeResolver {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();

        ThemeResolver::new(Arc::new(table), Arc::new(FixedClock(date)))
    }

    fn themed(id: SeasonId, start: MonthDay, end: MonthDay) -> Theme {
        let mut theme = ThemeTable::builtin().get(id).unwrap().clone();
        theme.period = ActivePeriod::new(start, end);
        theme
    }

    #[test]
    fn known_dates() {
        let cases = [
            ((2024, 10, 15), SeasonId::Halloween),
            ((2024, 12, 15), SeasonId::Christmas),
            ((2024, 2, 10), SeasonId::Valentine),
            ((2024, 6, 15), SeasonId::Default),
            ((2024, 4, 1), SeasonId::Easter),
        ];

        for ((year, month, day), expected) in cases {
            assert_eq!(
                resolver_on(year, month, day).current_season(),
                expected,
                "{year}-{month}-{day}"
            );
        }
    }

    #[test]
    fn builtin_boundaries_are_inclusive() {
        assert_eq!(resolver_on(2024, 10, 1).current_season(), SeasonId::Halloween);
        assert_eq!(resolver_on(2024, 11, 2).current_season(), SeasonId::Halloween);
        assert_eq!(resolver_on(2024, 11, 3).current_season(), SeasonId::Default);
        assert_eq!(resolver_on(2024, 9, 30).current_season(), SeasonId::Default);
        assert_eq!(resolver_on(2024, 3, 14).current_season(), SeasonId::Default);
        assert_eq!(resolver_on(2024, 3, 15).current_season(), SeasonId::Easter);
        assert_eq!(resolver_on(2024, 4, 15).current_season(), SeasonId::Easter);
        assert_eq!(resolver_on(2024, 4, 16).current_season(), SeasonId::Default);
        assert_eq!(resolver_on(2024, 12, 31).current_season(), SeasonId::Christmas);
        assert_eq!(resolver_on(2025, 1, 1).current_season(), SeasonId::Default);
    }

    #[test]
    fn every_day_resolves_to_a_declared_season() {
        let table = Arc::new(ThemeTable::builtin());
        let declared = SeasonId::all();

        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for date in first.iter_days().take_while(|date| date.year() == 2024) {
            let resolver = ThemeResolver::new(table.clone(), Arc::new(FixedClock(date)));
            let season = resolver.current_season();

            assert!(declared.contains(&season));
            assert_eq!(resolver.theme(None).id, season);
        }
    }

    #[test]
    fn theme_lookup_matches_id() {
        let resolver = resolver_on(2024, 6, 15);

        for id in SeasonId::all() {
            assert_eq!(resolver.theme(Some(id)).id, id);
        }
    }

    #[test]
    fn explicit_season_ignores_the_clock() {
        let resolver = resolver_on(2024, 10, 15);

        assert_eq!(resolver.theme(Some(SeasonId::Easter)).id, SeasonId::Easter);
        assert_eq!(resolver.theme(None).id, SeasonId::Halloween);
    }

    #[test]
    fn resolution_is_idempotent() {
        let resolver = resolver_on(2024, 12, 15);

        let first = resolver.theme(Some(resolver.current_season())).clone();
        let second = resolver.theme(Some(resolver.current_season())).clone();

        assert_eq!(first, second);
    }

    #[test]
    fn projections_match_the_theme() {
        let resolver = resolver_on(2024, 2, 10);
        let theme = resolver.theme(None);

        assert_eq!(resolver.assets(None), &theme.assets);
        assert_eq!(resolver.colors(None), &theme.palette);
        assert_eq!(resolver.presentation(None), &theme.presentation);
        assert_eq!(resolver.colors(None).primary, "#EC4899");
        assert_eq!(
            resolver.presentation(Some(SeasonId::Christmas)).class_name,
            "theme-christmas"
        );
    }

    #[test]
    fn missing_season_falls_back_to_default() {
        let table = ThemeTable::new(vec![
            themed(SeasonId::Easter, MonthDay::new(3, 15), MonthDay::new(4, 15)),
            ThemeTable::builtin().default_theme().clone(),
        ])
        .unwrap();
        let resolver = resolver_with(table, 2024, 10, 15);

        assert_eq!(resolver.current_season(), SeasonId::Default);
        assert_eq!(resolver.theme(Some(SeasonId::Halloween)).id, SeasonId::Default);
    }

    #[test]
    fn default_period_is_never_tested() {
        // only the default theme is present, so every day falls through
        let table = ThemeTable::new(vec![ThemeTable::builtin().default_theme().clone()]).unwrap();

        for (month, day) in [(1, 1), (6, 15), (12, 31)] {
            let resolver = resolver_with(table.clone(), 2024, month, day);
            assert_eq!(resolver.current_season(), SeasonId::Default);
        }
    }

    #[test]
    fn wrapping_period_across_new_year() {
        let table = ThemeTable::new(vec![
            themed(SeasonId::Christmas, MonthDay::new(12, 1), MonthDay::new(1, 2)),
            ThemeTable::builtin().default_theme().clone(),
        ])
        .unwrap();

        for (year, month, day) in [(2024, 12, 15), (2025, 1, 1), (2025, 1, 2)] {
            let resolver = resolver_with(table.clone(), year, month, day);
            assert_eq!(resolver.current_season(), SeasonId::Christmas);
        }

        for (year, month, day) in [(2024, 6, 15), (2025, 1, 3)] {
            let resolver = resolver_with(table.clone(), year, month, day);
            assert_eq!(resolver.current_season(), SeasonId::Default);
        }
    }

    #[test]
    fn shared_boundary_goes_to_first_declared() {
        // easter ends on the day valentine begins
        let table = ThemeTable::new(vec![
            themed(SeasonId::Easter, MonthDay::new(3, 1), MonthDay::new(3, 20)),
            themed(SeasonId::Valentine, MonthDay::new(3, 20), MonthDay::new(4, 10)),
            ThemeTable::builtin().default_theme().clone(),
        ])
        .unwrap();

        let on = |month, day| resolver_with(table.clone(), 2024, month, day).current_season();

        assert_eq!(on(3, 19), SeasonId::Easter);
        assert_eq!(on(3, 20), SeasonId::Easter);
        assert_eq!(on(3, 21), SeasonId::Valentine);

        // swapping the declaration order hands the shared day to valentine
        let table = ThemeTable::new(vec![
            themed(SeasonId::Valentine, MonthDay::new(3, 20), MonthDay::new(4, 10)),
            themed(SeasonId::Easter, MonthDay::new(3, 1), MonthDay::new(3, 20)),
            ThemeTable::builtin().default_theme().clone(),
        ])
        .unwrap();

        assert_eq!(
            resolver_with(table, 2024, 3, 20).current_season(),
            SeasonId::Valentine
        );
    }
}
