use maud::{html, Markup};

use crate::{
    templates::{
        fragments::{route_map, station_section},
        layouts::{base, CurrentPage, PageConfig},
    },
    Briefing, BriefingEntry,
};

pub fn briefing_page(api_base: &str, briefing: &Briefing) -> Markup {
    let config = PageConfig {
        title: "Preflight Weather Briefing - Report",
        api_base,
        current_page: CurrentPage::Briefing,
    };

    base(&config, briefing_content(briefing))
}

/// Report entries in order, destinations grouped under their own heading
pub fn briefing_content(briefing: &Briefing) -> Markup {
    let flight_level = briefing.flight_level.as_ref();
    // Heading sits where destination processing began
    let has_destinations = briefing.entries.len() > briefing.destinations_start;

    html! {
        div class="box" {
            h2 class="title is-5 mb-3" { "Route" }
            (route_map(&briefing.route))
        }

        @for (i, entry) in briefing.entries.iter().enumerate() {
            @if has_destinations && i == briefing.destinations_start {
                h2 class="title is-4 mt-5" { "Destination Briefings" }
            }
            @match entry {
                BriefingEntry::Warning(message) => {
                    div class="notification is-warning is-light briefing-warning" { (message) }
                }
                BriefingEntry::Stop(stop) => {
                    (station_section(stop, flight_level))
                }
            }
        }

        @if briefing.entries.is_empty() {
            p class="has-text-grey" { "Nothing to brief." }
        }
    }
}
