use super::feed_writer::XmlDocument;
use crate::shared::errors::AppResult;

struct CategoryNode {
    id: &'static str,
    name: &'static str,
    subcategories: &'static [(&'static str, &'static str)],
}

const CATEGORY_TREE: &[CategoryNode] = &[
    CategoryNode {
        id: "2000",
        name: "Movies",
        subcategories: &[
            ("2010", "Movies/Foreign"),
            ("2020", "Movies/Other"),
            ("2030", "Movies/SD"),
            ("2040", "Movies/HD"),
            ("2045", "Movies/UHD"),
            ("2050", "Movies/BluRay"),
            ("2060", "Movies/3D"),
        ],
    },
    CategoryNode {
        id: "5000",
        name: "TV",
        subcategories: &[
            ("5020", "TV/Foreign"),
            ("5030", "TV/SD"),
            ("5040", "TV/HD"),
            ("5045", "TV/UHD"),
            ("5050", "TV/Other"),
            ("5060", "TV/Sport"),
            ("5070", "TV/Anime"),
            ("5080", "TV/Documentary"),
        ],
    },
    CategoryNode {
        id: "3000",
        name: "Audio",
        subcategories: &[
            ("3010", "Audio/MP3"),
            ("3020", "Audio/Video"),
            ("3030", "Audio/Audiobook"),
            ("3040", "Audio/Lossless"),
        ],
    },
    CategoryNode {
        id: "1000",
        name: "Console",
        subcategories: &[],
    },
    CategoryNode {
        id: "4000",
        name: "PC",
        subcategories: &[],
    },
    CategoryNode {
        id: "6000",
        name: "XXX",
        subcategories: &[],
    },
    CategoryNode {
        id: "7000",
        name: "Books",
        subcategories: &[],
    },
    CategoryNode {
        id: "8000",
        name: "Other",
        subcategories: &[],
    },
];

/// Torznab `t=caps` document
pub fn render_capabilities() -> AppResult<String> {
    let mut doc = XmlDocument::new()?;
    doc.open("caps", &[])?;
    doc.empty("server", &[("version", "1.0"), ("title", "Seedable")])?;
    doc.empty("limits", &[("max", "100"), ("default", "100")])?;

    doc.open("searching", &[])?;
    doc.empty("search", &[("available", "yes"), ("supportedParams", "q")])?;
    doc.empty(
        "tv-search",
        &[("available", "yes"), ("supportedParams", "q,season,ep,tvdbid")],
    )?;
    doc.empty(
        "movie-search",
        &[("available", "yes"), ("supportedParams", "q,imdbid")],
    )?;
    doc.close("searching")?;

    doc.open("categories", &[])?;
    for node in CATEGORY_TREE {
        let attributes = [("id", node.id), ("name", node.name)];
        if node.subcategories.is_empty() {
            doc.empty("category", &attributes)?;
            continue;
        }
        doc.open("category", &attributes)?;
        for &(id, name) in node.subcategories {
            doc.empty("subcat", &[("id", id), ("name", name)])?;
        }
        doc.close("category")?;
    }
    doc.close("categories")?;

    doc.close("caps")?;
    doc.finish()
}
