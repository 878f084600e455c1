use leptos::prelude::*;

/// One entry in a breadcrumb trail.
#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub label: String,
    pub href: String,
    pub active: bool,
}

impl Crumb {
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            active: false,
        }
    }

    pub fn active(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            active: true,
        }
    }
}

#[component]
pub fn Breadcrumbs(trail: Vec<Crumb>) -> impl IntoView {
    view! {
        <nav aria-label="Breadcrumb" class="breadcrumbs text-sm">
            <ul>
                {trail
                    .into_iter()
                    .map(|crumb| {
                        if crumb.active {
                            view! {
                                <li aria-current="page" class="font-semibold">
                                    {crumb.label}
                                </li>
                            }
                                .into_any()
                        } else {
                            view! {
                                <li>
                                    <a href=crumb.href>{crumb.label}</a>
                                </li>
                            }
                                .into_any()
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
