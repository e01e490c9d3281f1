//! HTML rendering. Every value that came from the API goes through
//! `html_escape` before it reaches the page.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::collections::HashMap;
use std::fmt::Write;

use crate::entities::{characters, episodes, quotes, seasons, shows};

pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | FanHub</title>
<link rel="stylesheet" href="/static/app.css">
</head>
<body>
<header class="site-header">
<a class="brand" href="/">FanHub</a>
<nav><a href="/">Shows</a><a href="/characters">Characters</a><a href="/quotes">Quotes</a></nav>
</header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = text(title),
    )
}

fn years(show: &shows::Model) -> String {
    show.end_year.map_or_else(
        || format!("{}–present", show.start_year),
        |end| format!("{}–{end}", show.start_year),
    )
}

pub fn show_list(shows: &[shows::Model]) -> String {
    let mut body = String::from("<h1>Shows</h1>\n");

    if shows.is_empty() {
        body.push_str("<p class=\"empty\">No shows yet.</p>\n");
        return layout("Shows", &body);
    }

    body.push_str("<ul class=\"cards\">\n");
    for show in shows {
        let _ = writeln!(
            body,
            "<li class=\"card\"><a href=\"/shows/{id}\"><h2>{title}</h2></a>\
             <p class=\"meta\">{genre} · {network} · {years}</p>\
             <p>{description}</p></li>",
            id = show.id,
            title = text(&show.title),
            genre = text(&show.genre),
            network = text(&show.network),
            years = years(show),
            description = text(&show.description),
        );
    }
    body.push_str("</ul>\n");

    layout("Shows", &body)
}

fn character_rows(body: &mut String, characters: &[characters::Model]) {
    body.push_str("<ul class=\"characters\">\n");
    for character in characters {
        let _ = writeln!(
            body,
            "<li><strong>{name}</strong>{main} <span class=\"meta\">played by {actor}</span> \
             <span class=\"status status-{status_class}\">{status}</span><p>{bio}</p></li>",
            name = text(&character.name),
            main = if character.is_main_character {
                " <span class=\"badge\">main</span>"
            } else {
                ""
            },
            actor = text(&character.actor_name),
            status_class = attr(&character.status.to_lowercase()),
            status = text(&character.status),
            bio = text(&character.bio),
        );
    }
    body.push_str("</ul>\n");
}

pub fn show_detail(
    show: &shows::Model,
    seasons: &[seasons::Model],
    characters: &[characters::Model],
) -> String {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "<h1>{title}</h1>\n<p class=\"meta\">{genre} · {network} · {years}</p>\n<p>{description}</p>",
        title = text(&show.title),
        genre = text(&show.genre),
        network = text(&show.network),
        years = years(show),
        description = text(&show.description),
    );

    body.push_str("<h2>Seasons</h2>\n");
    if seasons.is_empty() {
        body.push_str("<p class=\"empty\">No seasons listed.</p>\n");
    } else {
        body.push_str("<ul class=\"seasons\">\n");
        for season in seasons {
            let _ = writeln!(
                body,
                "<li><a href=\"/seasons/{id}\">{title}</a> <span class=\"meta\">{count} episodes</span></li>",
                id = season.id,
                title = text(&season.title),
                count = season.episode_count,
            );
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<h2>Characters</h2>\n");
    if characters.is_empty() {
        body.push_str("<p class=\"empty\">No characters listed.</p>\n");
    } else {
        character_rows(&mut body, characters);
    }

    layout(&show.title, &body)
}

pub fn season_detail(
    show: &shows::Model,
    season: &seasons::Model,
    episodes: &[episodes::Model],
) -> String {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "<p class=\"crumbs\"><a href=\"/shows/{show_id}\">{show_title}</a></p>\n<h1>{title}</h1>",
        show_id = show.id,
        show_title = text(&show.title),
        title = text(&season.title),
    );

    if episodes.is_empty() {
        body.push_str("<p class=\"empty\">No episodes listed.</p>\n");
    } else {
        body.push_str(
            "<table class=\"episodes\">\n<thead><tr><th>#</th><th>Title</th><th>Aired</th><th>Runtime</th></tr></thead>\n<tbody>\n",
        );
        for episode in episodes {
            let aired = episode
                .air_date
                .map_or_else(|| "TBA".to_string(), |d| d.format("%Y-%m-%d").to_string());
            let _ = writeln!(
                body,
                "<tr><td>{number}</td><td><strong>{title}</strong><p>{description}</p></td><td>{aired}</td><td>{runtime} min</td></tr>",
                number = episode.episode_number,
                title = text(&episode.title),
                description = text(&episode.description),
                runtime = episode.runtime_minutes,
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    let title = format!("{} {}", show.title, season.title);
    layout(&title, &body)
}

pub fn character_list(characters: &[characters::Model], search: Option<&str>) -> String {
    let mut body = String::from("<h1>Characters</h1>\n");
    let _ = writeln!(
        body,
        "<form class=\"search\" method=\"get\" action=\"/characters\">\
         <input type=\"search\" name=\"search\" placeholder=\"Name or actor\" value=\"{value}\">\
         <button type=\"submit\">Search</button></form>",
        value = attr(search.unwrap_or_default()),
    );

    if characters.is_empty() {
        match search {
            Some(term) => {
                let _ = writeln!(
                    body,
                    "<p class=\"empty\">No characters match “{}”.</p>",
                    text(term)
                );
            }
            None => body.push_str("<p class=\"empty\">No characters yet.</p>\n"),
        }
    } else {
        character_rows(&mut body, characters);
    }

    layout("Characters", &body)
}

pub fn quote_list(quotes: &[quotes::Model], characters: &[characters::Model]) -> String {
    let names: HashMap<i32, &str> = characters
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut body = String::from(
        "<h1>Quotes</h1>\n<p class=\"filters\"><a href=\"/quotes\">All</a> · <a href=\"/quotes?famous=true\">Famous</a></p>\n",
    );

    if quotes.is_empty() {
        body.push_str("<p class=\"empty\">No quotes yet.</p>\n");
        return layout("Quotes", &body);
    }

    body.push_str("<ul class=\"quotes\">\n");
    for quote in quotes {
        let speaker = names.get(&quote.character_id).copied().unwrap_or("Unknown");
        let _ = writeln!(
            body,
            "<li class=\"quote{famous}\"><blockquote>{text}</blockquote>\
             <p class=\"meta\">{speaker} · <span class=\"likes\">{likes} likes</span></p></li>",
            famous = if quote.is_famous { " famous" } else { "" },
            text = text(&quote.quote_text),
            speaker = text(speaker),
            likes = quote.likes,
        );
    }
    body.push_str("</ul>\n");

    layout("Quotes", &body)
}

pub fn error_page(status: u16, message: &str) -> String {
    let body = format!(
        "<div class=\"error\"><h1>{status}</h1><p>{message}</p><p><a href=\"/\">Back to shows</a></p></div>\n",
        message = text(message),
    );
    layout("Error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(title: &str) -> shows::Model {
        shows::Model {
            id: 1,
            title: title.to_string(),
            description: "<script>alert(1)</script>".to_string(),
            genre: "Drama".to_string(),
            start_year: 2008,
            end_year: None,
            network: "AMC".to_string(),
        }
    }

    #[test]
    fn test_show_list_escapes_api_data() {
        let html = show_list(&[show("<b>Bold</b> & Co")]);
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; &amp; Co"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("2008–present"));
    }

    #[test]
    fn test_search_value_is_attribute_escaped() {
        let html = character_list(&[], Some("\"><script>x</script>"));
        assert!(!html.contains("<script>x"));
        assert!(html.contains("&quot;&gt;"));
    }

    #[test]
    fn test_quote_list_names_speakers() {
        let character = characters::Model {
            id: 9,
            show_id: 1,
            name: "Saul Goodman".to_string(),
            actor_name: "Bob Odenkirk".to_string(),
            bio: String::new(),
            is_main_character: false,
            status: "alive".to_string(),
        };
        let quote = quotes::Model {
            id: 1,
            show_id: 1,
            character_id: 9,
            episode_id: 1,
            quote_text: "Better call Saul!".to_string(),
            is_famous: true,
            likes: 4,
        };

        let html = quote_list(&[quote], &[character]);
        assert!(html.contains("Saul Goodman"));
        assert!(html.contains("4 likes"));
        assert!(html.contains("class=\"quote famous\""));
    }
}
