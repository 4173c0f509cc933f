use maud::{html, Markup};

use crate::templates::layouts::CurrentPage;

pub fn navbar(current_page: CurrentPage) -> Markup {
    html! {
        nav class="navbar mb-4" role="navigation" aria-label="main navigation" {
            div class="navbar-menu is-active" {
                div class="navbar-start" {
                    a href="/" class=(nav_item_class(current_page, CurrentPage::Request)) {
                        span class="icon-text" {
                            span class="icon" { (plane_icon()) }
                            span { "New Briefing" }
                        }
                    }
                    @if current_page == CurrentPage::Briefing {
                        span class=(nav_item_class(current_page, CurrentPage::Briefing)) {
                            span class="icon-text" {
                                span class="icon" { (report_icon()) }
                                span { "Briefing" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn nav_item_class(current: CurrentPage, page: CurrentPage) -> &'static str {
    if current == page {
        "navbar-item is-active"
    } else {
        "navbar-item"
    }
}

fn plane_icon() -> Markup {
    html! {
        svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24"
            fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" {
            path d="M17.8 19.2 16 11l3.5-3.5C21 6 21.5 4 21 3c-1-.5-3 0-4.5 1.5L13 8 4.8 6.2c-.5-.1-.9.1-1.1.5l-.3.5c-.2.5-.1 1 .3 1.3L9 12l-2 3H4l-1 1 3 2 2 3 1-1v-3l3-2 3.5 5.3c.3.4.8.5 1.3.3l.5-.2c.4-.3.6-.7.5-1.2z" {}
        }
    }
}

fn report_icon() -> Markup {
    html! {
        svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24"
            fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" {
            path d="M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z" {}
            polyline points="14 2 14 8 20 8" {}
            line x1="16" y1="13" x2="8" y2="13" {}
            line x1="16" y1="17" x2="8" y2="17" {}
        }
    }
}
