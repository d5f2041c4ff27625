use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub image: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub author: Author,
}

const IMAGE_QUERY: &str = "?auto=compress&cs=tinysrgb&w=500&h=300&fit=crop";
const AVATAR_QUERY: &str = "?auto=compress&cs=tinysrgb&w=100&h=100&fit=crop";

fn pexels(photo: u32, query: &str) -> String {
    format!(
        "https://images.pexels.com/photos/{0}/pexels-photo-{0}.jpeg{1}",
        photo, query
    )
}

fn post(
    photo: u32,
    category: &str,
    title: &str,
    description: &str,
    (name, avatar, date): (&str, u32, &str),
) -> Post {
    Post {
        image: pexels(photo, IMAGE_QUERY),
        category: category.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        author: Author {
            name: name.to_string(),
            avatar: pexels(avatar, AVATAR_QUERY),
            date: date.to_string(),
        },
    }
}

lazy_static! {
    /// Posts appended by "load more", in order.
    pub static ref CATALOG: Vec<Post> = vec![
        post(
            3184660,
            "Technology",
            "The Future of Web Development",
            "Exploring emerging trends and technologies that will shape the future of web development.",
            ("Sarah Johnson", 3785079, "11 Jan 2024"),
        ),
        post(
            3184680,
            "Design",
            "Minimalist Design Principles",
            "How to create clean, effective designs that communicate clearly and beautifully.",
            ("Marcus Chen", 3777931, "10 Jan 2024"),
        ),
        post(
            3184690,
            "Business",
            "Remote Work Best Practices",
            "Essential strategies for building and managing successful remote teams in 2025.",
            ("Emma Wilson", 3785079, "9 Jan 2024"),
        ),
    ];

    /// Cards already present in the page markup before any script runs.
    pub static ref FEATURED: Vec<Post> = vec![
        post(
            3184291,
            "Technology",
            "Getting Started with Rust",
            "A practical tour of ownership, borrowing and the tooling around it.",
            ("Sarah Johnson", 3785079, "18 Jan 2024"),
        ),
        post(
            3183150,
            "Design",
            "Color Theory for Interfaces",
            "Choosing palettes that stay readable across light and dark themes.",
            ("Marcus Chen", 3777931, "16 Jan 2024"),
        ),
        post(
            3183197,
            "Business",
            "Pricing Your First Product",
            "Simple models for turning a side project into steady revenue.",
            ("Emma Wilson", 3785079, "15 Jan 2024"),
        ),
        post(
            1181244,
            "Web Development",
            "Responsive Layouts Without Frameworks",
            "Grid and flexbox patterns that cover most listing pages.",
            ("Daniel Park", 2379004, "14 Jan 2024"),
        ),
        post(
            1640777,
            "Lifestyle",
            "Building a Sustainable Writing Habit",
            "Small daily routines that keep a blog alive for years.",
            ("Olivia Brown", 774909, "13 Jan 2024"),
        ),
        post(
            3182812,
            "Technology",
            "Static Sites in Production",
            "Caching, deployment and the trade-offs of shipping plain HTML.",
            ("Daniel Park", 2379004, "12 Jan 2024"),
        ),
    ];
}
