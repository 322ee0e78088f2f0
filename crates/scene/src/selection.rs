use foundation::time::Time;
use runtime::timer::{TimerHandle, TimerQueue};

use crate::World;
use crate::entity::CountryId;
use crate::style::Highlight;

/// Hover/selection bookkeeping plus the single pending navigation timer.
///
/// Visual precedence: a selected country keeps its selected highlight while
/// hovered, and hover changes never touch it.
#[derive(Debug, Default)]
pub struct SelectionState {
    hovered: Option<CountryId>,
    selected: Option<CountryId>,
    navigation: TimerQueue<CountryId>,
    pending_navigation: Option<TimerHandle>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<CountryId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<CountryId> {
        self.selected
    }

    pub fn pending_navigation(&self) -> Option<TimerHandle> {
        self.pending_navigation
    }

    /// Moves the hover highlight to `country`.
    ///
    /// Returns `true` if the hovered country changed.
    pub fn hover(&mut self, world: &mut World, country: Option<CountryId>) -> bool {
        if country == self.hovered {
            return false;
        }
        if let Some(prev) = self.hovered
            && Some(prev) != self.selected
        {
            world.set_highlight(prev, Highlight::None);
        }
        self.hovered = country;
        if let Some(next) = country
            && Some(next) != self.selected
        {
            world.set_highlight(next, Highlight::Hover);
        }
        true
    }

    pub fn clear_hover(&mut self, world: &mut World) -> bool {
        self.hover(world, None)
    }

    /// Applies the selected highlight to `country`, releasing any previous selection.
    ///
    /// Does not touch the navigation timer.
    pub fn select(&mut self, world: &mut World, country: CountryId) {
        if let Some(prev) = self.selected
            && prev != country
        {
            let fallback = if Some(prev) == self.hovered {
                Highlight::Hover
            } else {
                Highlight::None
            };
            world.set_highlight(prev, fallback);
        }
        self.selected = Some(country);
        world.set_highlight(country, Highlight::Selected);
    }

    /// Arms the navigation timer for `country`, cancelling any pending one.
    pub fn arm_navigation(&mut self, due: Time, country: CountryId) -> TimerHandle {
        self.cancel_navigation();
        let handle = self.navigation.schedule(due, country);
        self.pending_navigation = Some(handle);
        handle
    }

    /// Returns `true` if a pending timer was cancelled.
    pub fn cancel_navigation(&mut self) -> bool {
        match self.pending_navigation.take() {
            Some(handle) => self.navigation.cancel(handle),
            None => false,
        }
    }

    /// Fires the navigation timer if it is due at `now`.
    pub fn poll_navigation(&mut self, now: Time) -> Option<CountryId> {
        if self.navigation.is_empty() {
            return None;
        }
        let (handle, country) = self.navigation.pop_due(now)?;
        if self.pending_navigation == Some(handle) {
            self.pending_navigation = None;
        }
        Some(country)
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionState;
    use crate::World;
    use crate::entity::CountryId;
    use crate::geometry::{OutlineGeometry, PickSurface};
    use crate::style::Highlight;
    use crate::world::NewCountry;
    use foundation::time::Time;

    fn world_with(n: usize) -> World {
        let mut world = World::new();
        for i in 0..n {
            world.spawn_country(NewCountry {
                numeric_code: None,
                iso3: None,
                display_name: format!("c{i}"),
                record: None,
                outline: OutlineGeometry::default(),
                pick: PickSurface::default(),
            });
        }
        world
    }

    fn highlight(world: &World, id: u32) -> Highlight {
        world.country(CountryId(id)).map(|c| c.highlight()).unwrap_or_default()
    }

    #[test]
    fn hover_moves_highlight() {
        let mut world = world_with(2);
        let mut sel = SelectionState::new();
        assert!(sel.hover(&mut world, Some(CountryId(0))));
        assert!(!sel.hover(&mut world, Some(CountryId(0))));
        assert_eq!(highlight(&world, 0), Highlight::Hover);

        sel.hover(&mut world, Some(CountryId(1)));
        assert_eq!(highlight(&world, 0), Highlight::None);
        assert_eq!(highlight(&world, 1), Highlight::Hover);

        sel.clear_hover(&mut world);
        assert_eq!(highlight(&world, 1), Highlight::None);
        assert_eq!(sel.hovered(), None);
    }

    #[test]
    fn selected_takes_precedence_over_hover() {
        let mut world = world_with(2);
        let mut sel = SelectionState::new();
        sel.select(&mut world, CountryId(0));
        sel.hover(&mut world, Some(CountryId(0)));
        assert_eq!(highlight(&world, 0), Highlight::Selected);

        // Leaving the selected country keeps it selected.
        sel.hover(&mut world, Some(CountryId(1)));
        assert_eq!(highlight(&world, 0), Highlight::Selected);
        assert_eq!(highlight(&world, 1), Highlight::Hover);

        // Selecting the hovered country, then releasing it, falls back to hover.
        sel.select(&mut world, CountryId(1));
        sel.select(&mut world, CountryId(0));
        assert_eq!(highlight(&world, 1), Highlight::Hover);
    }

    #[test]
    fn only_one_navigation_timer_is_pending() {
        let mut sel = SelectionState::new();
        let a = sel.arm_navigation(Time(0.7), CountryId(0));
        let b = sel.arm_navigation(Time(0.9), CountryId(1));
        assert_ne!(a, b);
        assert_eq!(sel.pending_navigation(), Some(b));

        assert_eq!(sel.poll_navigation(Time(0.8)), None);
        assert_eq!(sel.poll_navigation(Time(0.9)), Some(CountryId(1)));
        assert_eq!(sel.pending_navigation(), None);
        assert_eq!(sel.poll_navigation(Time(5.0)), None);
    }

    #[test]
    fn cancelled_navigation_never_fires() {
        let mut sel = SelectionState::new();
        sel.arm_navigation(Time(0.7), CountryId(0));
        assert!(sel.cancel_navigation());
        assert!(!sel.cancel_navigation());
        assert_eq!(sel.poll_navigation(Time(10.0)), None);
    }
}
