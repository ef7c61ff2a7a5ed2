// msgview - A terminal viewer for very large chat-message archives
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Sliding-window pagination over an ordered message source.
//!
//! [`policy`] computes windows, [`trigger`] decides when to extend,
//! [`anchor`] keeps the scroll position stable across a mutation and
//! [`controller`] ties them into a single load cycle at a time.

pub mod anchor;
pub mod config;
pub mod controller;
pub mod policy;
pub mod range;
pub mod trigger;

pub use anchor::{PinnedRow, ScrollAnchor, Viewport};
pub use config::{ConfigError, WindowConfig, default_window_config};
pub use controller::{
    Completion, Continuation, CyclePhase, ScrollAction, SourceGeneration, WindowController,
    WindowView,
};
pub use policy::LoadIntent;
pub use range::Window;
pub use trigger::{ProximityTrigger, ViewportMetrics};
