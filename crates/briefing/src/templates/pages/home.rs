use maud::{html, Markup};

use crate::{
    templates::layouts::{base, CurrentPage, PageConfig},
    MAX_DESTINATIONS,
};

/// Briefing request form
pub fn home_page(api_base: &str) -> Markup {
    let config = PageConfig {
        title: "Preflight Weather Briefing",
        api_base,
        current_page: CurrentPage::Request,
    };

    base(&config, home_content())
}

pub fn home_content() -> Markup {
    html! {
        form class="box" method="post" action="/" {
            h2 class="title is-5 mb-4" { "Departure" }

            div class="columns is-multiline" {
                div class="column is-full-mobile is-one-third-desktop" {
                    div class="field" {
                        label class="label" for="station" { "Station" }
                        div class="control" {
                            input id="station" name="station" class="input station-input" type="text"
                                  placeholder="KDEN" maxlength="4" required;
                        }
                    }
                }
                div class="column is-full-mobile is-one-third-desktop" {
                    div class="field" {
                        label class="label" for="takeoff" { "Takeoff (Zulu)" }
                        div class="control" {
                            input id="takeoff" name="takeoff" class="input" type="text"
                                  placeholder="1430Z or 2026-10-18 14:30Z" required;
                        }
                    }
                }
                div class="column is-full-mobile is-one-third-desktop" {
                    div class="field" {
                        label class="label" for="flight_level" { "Cruise Flight Level" }
                        div class="control" {
                            input id="flight_level" name="flight_level" class="input" type="text"
                                  placeholder="FL085";
                        }
                        p class="help" { "Optional. Adds estimated winds and temperature aloft." }
                    }
                }
            }

            h2 class="title is-5 mt-4 mb-4" { "Destinations" }

            @for index in 1..=MAX_DESTINATIONS {
                div class="columns" {
                    div class="column is-half" {
                        div class="field" {
                            label class="label is-small" for=(format!("dest{}_station", index)) {
                                "Destination " (index)
                            }
                            div class="control" {
                                input id=(format!("dest{}_station", index))
                                      name=(format!("dest{}_station", index))
                                      class="input station-input" type="text" maxlength="4";
                            }
                        }
                    }
                    div class="column is-half" {
                        div class="field" {
                            label class="label is-small" for=(format!("dest{}_time", index)) {
                                "Arrival (HHMMZ)"
                            }
                            div class="control" {
                                input id=(format!("dest{}_time", index))
                                      name=(format!("dest{}_time", index))
                                      class="input" type="text" placeholder="1615Z";
                            }
                        }
                    }
                }
            }

            div class="control mt-4" {
                button type="submit" class="button is-primary" { "Get Briefing" }
            }
        }
    }
}
