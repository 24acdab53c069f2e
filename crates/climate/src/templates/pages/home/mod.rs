use maud::{html, Markup};

use crate::{
    templates::layouts::{base, PageConfig},
    Summary,
};

pub fn home_page(api_base: &str, summary: &Summary) -> Markup {
    let config = PageConfig {
        title: "Hawaii Weather Station Data",
        api_base,
    };

    base(&config, content(summary))
}

fn content(summary: &Summary) -> Markup {
    let api = "/api/v1.0";

    html! {
        div class="content" {
            p class="subtitle" {
                "Observations from " (summary.first_date) " to " (summary.last_date)
            }
            hr;
            h4 { "Available routes" }
            ol {
                li {
                    a href={ (api) "/precipitation" } { "/api/v1.0/precipitation" }
                    " - precipitation amounts for the last 12 months"
                }
                li {
                    a href={ (api) "/stations" } { "/api/v1.0/stations" }
                    " - list of weather stations"
                }
                li {
                    a href={ (api) "/tobs" } { "/api/v1.0/tobs" }
                    " - last 12 months of temperature observations for the most active station ("
                    (summary.most_active_station) ")"
                }
                li {
                    "/api/v1.0/<start> - minimum, average and maximum temperature on or after the start date (format: yyyy-mm-dd)"
                    br;
                    "Example: "
                    a href={ (api) "/2016-08-23" } { "/api/v1.0/2016-08-23" }
                    " for dates on or after August 23, 2016"
                }
                li {
                    "/api/v1.0/<start>/<end> - minimum, average and maximum temperature from the start date to the end date"
                    br;
                    "Example: "
                    a href={ (api) "/2016-08-23/2017-08-23" } { "/api/v1.0/2016-08-23/2017-08-23" }
                    " for dates between August 23, 2016 and August 23, 2017"
                }
            }
        }
    }
}
