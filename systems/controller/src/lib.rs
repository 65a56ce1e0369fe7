#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-based controller state with held-direction priority.
//!
//! Adapters report which keys the player is holding through
//! [`Controller::set_user_pressed`]; the game samples that state once per tick
//! via [`Controller::update`], which derives press edges and keeps a stack of
//! the direction buttons currently down.

use seafarer_core::{ControllerButton, Direction};

/// Edge-detecting state of a single button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Button {
    user_pressed: bool,
    was_down: bool,
    is_down: bool,
}

impl Button {
    /// Records whether the player is physically holding the button.
    ///
    /// The game only observes the change on the next [`Button::update`].
    pub fn set_user_pressed(&mut self, pressed: bool) {
        self.user_pressed = pressed;
    }

    /// Whether the player is physically holding the button right now.
    #[must_use]
    pub const fn user_pressed(&self) -> bool {
        self.user_pressed
    }

    /// Samples the physical state for the current tick.
    pub fn update(&mut self) {
        self.was_down = self.is_down;
        self.is_down = self.user_pressed;
    }

    /// Down this tick but not the previous one.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.is_down && !self.was_down
    }

    /// Down this tick and the previous one.
    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.is_down && self.was_down
    }

    /// Down this tick.
    #[must_use]
    pub const fn is_down(&self) -> bool {
        self.is_down
    }

    /// Down the previous tick.
    #[must_use]
    pub const fn was_down(&self) -> bool {
        self.was_down
    }
}

/// Player controller aggregating every [`ControllerButton`].
#[derive(Clone, Debug, Default)]
pub struct Controller {
    buttons: [Button; ControllerButton::ALL.len()],
    // Last element is the top of the stack.
    directions_down: Vec<Direction>,
}

impl Controller {
    /// Creates a controller with every button released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records whether the player is holding `button`.
    pub fn set_user_pressed(&mut self, button: ControllerButton, pressed: bool) {
        self.button_mut(button).set_user_pressed(pressed);
    }

    /// State of `button` as of the last update.
    #[must_use]
    pub fn button(&self, button: ControllerButton) -> &Button {
        &self.buttons[index(button)]
    }

    /// Samples every button in [`ControllerButton::ALL`] order and refreshes
    /// the direction stack.
    pub fn update(&mut self) {
        let mut arrived = Vec::new();
        for button in ControllerButton::ALL {
            let state = self.button_mut(button);
            state.update();
            let down = state.is_down();

            let Some(direction) = button.direction() else {
                continue;
            };
            let stacked = self.directions_down.contains(&direction);
            if down && !stacked {
                arrived.push(direction);
            } else if !down && stacked {
                self.directions_down.retain(|held| *held != direction);
            }
        }

        // Earliest button in update order ends on top.
        self.directions_down.extend(arrived.into_iter().rev());
    }

    /// Buttons that went down this tick, in [`ControllerButton::ALL`] order.
    #[must_use]
    pub fn pressed_buttons(&self) -> Vec<ControllerButton> {
        ControllerButton::ALL
            .into_iter()
            .filter(|button| self.button(*button).is_pressed())
            .collect()
    }

    /// Whether the pause button went down this tick.
    #[must_use]
    pub fn is_pause_pressed(&self) -> bool {
        self.button(ControllerButton::Pause).is_pressed()
    }

    /// Direction with the highest priority among those currently down.
    #[must_use]
    pub fn direction_down(&self) -> Option<Direction> {
        self.directions_down.last().copied()
    }

    fn button_mut(&mut self, button: ControllerButton) -> &mut Button {
        &mut self.buttons[index(button)]
    }
}

const fn index(button: ControllerButton) -> usize {
    match button {
        ControllerButton::Up => 0,
        ControllerButton::Down => 1,
        ControllerButton::Left => 2,
        ControllerButton::Right => 3,
        ControllerButton::Pause => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(controller: &mut Controller, held: &[ControllerButton]) {
        for button in ControllerButton::ALL {
            controller.set_user_pressed(button, held.contains(&button));
        }
        controller.update();
    }

    #[test]
    fn button_reports_press_then_hold_then_release() {
        let mut button = Button::default();
        button.set_user_pressed(true);
        assert!(!button.is_down(), "physical state is sampled on update");

        button.update();
        assert!(button.is_pressed());
        assert!(!button.is_held());

        button.update();
        assert!(!button.is_pressed());
        assert!(button.is_held());

        button.set_user_pressed(false);
        button.update();
        assert!(!button.is_down());
        assert!(button.was_down());
        assert!(!button.is_held());
    }

    #[test]
    fn index_follows_update_order() {
        for (position, button) in ControllerButton::ALL.into_iter().enumerate() {
            assert_eq!(index(button), position);
        }
    }

    #[test]
    fn simultaneous_up_and_right_prefers_up_until_released() {
        use ControllerButton::{Right, Up};
        let mut controller = Controller::new();

        tick(&mut controller, &[Up, Right]);
        assert_eq!(controller.direction_down(), Some(Direction::Up));

        tick(&mut controller, &[Up, Right]);
        assert_eq!(controller.direction_down(), Some(Direction::Up));

        tick(&mut controller, &[Right]);
        assert_eq!(controller.direction_down(), Some(Direction::Right));

        tick(&mut controller, &[]);
        assert_eq!(controller.direction_down(), None);
    }

    #[test]
    fn latest_press_takes_priority_over_older_holds() {
        use ControllerButton::{Down, Left};
        let mut controller = Controller::new();

        tick(&mut controller, &[Left]);
        tick(&mut controller, &[Left, Down]);
        assert_eq!(controller.direction_down(), Some(Direction::Down));

        tick(&mut controller, &[Left]);
        assert_eq!(controller.direction_down(), Some(Direction::Left));
    }

    #[test]
    fn pressed_buttons_only_lists_new_presses() {
        use ControllerButton::{Pause, Up};
        let mut controller = Controller::new();

        tick(&mut controller, &[Up, Pause]);
        assert_eq!(controller.pressed_buttons(), vec![Up, Pause]);
        assert!(controller.is_pause_pressed());

        tick(&mut controller, &[Up, Pause]);
        assert!(controller.pressed_buttons().is_empty());
        assert!(!controller.is_pause_pressed());
        assert!(controller.button(Up).is_held());
    }

    #[test]
    fn pause_never_enters_the_direction_stack() {
        let mut controller = Controller::new();
        tick(&mut controller, &[ControllerButton::Pause]);
        assert_eq!(controller.direction_down(), None);
    }
}
