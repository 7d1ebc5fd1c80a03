//! Posts-per-author aggregate for the chart panels.

use std::collections::HashMap;

use serde::Serialize;

use blogdash_core::Post;

/// Chart colours, indexed cyclically by bucket position.
pub const PALETTE: [&str; 6] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#A855F7", "#EF4444",
];

/// Number of posts by one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBucket {
    /// Author name, or `Unknown` for posts without one.
    pub name: String,
    /// Always at least 1.
    pub count: usize,
}

/// Group posts by author label and count them.
///
/// Buckets come out in order of each author's first appearance in `posts`;
/// legend and series order downstream depend on it.
pub fn aggregate(posts: &[Post]) -> Vec<AuthorBucket> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<AuthorBucket> = Vec::new();

    for post in posts {
        let name = post.author_label();
        match index.get(name) {
            Some(&i) => buckets[i].count += 1,
            None => {
                index.insert(name, buckets.len());
                buckets.push(AuthorBucket {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }

    buckets
}

/// Palette colour for the bucket at `index`.
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogdash_core::{PostId, UNKNOWN_AUTHOR};

    fn posts_by(authors: &[Option<&str>]) -> Vec<Post> {
        authors
            .iter()
            .enumerate()
            .map(|(i, author)| {
                let post = Post::new(PostId::from_number(i as i64 + 1), format!("Post {i}"));
                match author {
                    Some(a) => post.with_author(*a),
                    None => post,
                }
            })
            .collect()
    }

    #[test]
    fn empty_collection_has_no_buckets() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn first_appearance_order() {
        let posts = posts_by(&[
            Some("zoe"),
            Some("adam"),
            Some("zoe"),
            Some("mia"),
            Some("adam"),
            Some("zoe"),
        ]);

        let buckets = aggregate(&posts);
        let summary: Vec<_> = buckets.iter().map(|b| (b.name.as_str(), b.count)).collect();
        assert_eq!(summary, [("zoe", 3), ("adam", 2), ("mia", 1)]);
    }

    #[test]
    fn missing_and_empty_authors_share_unknown_bucket() {
        let posts = posts_by(&[None, Some("ann"), Some(""), None]);

        let buckets = aggregate(&posts);
        assert_eq!(
            buckets,
            vec![
                AuthorBucket {
                    name: UNKNOWN_AUTHOR.to_string(),
                    count: 3
                },
                AuthorBucket {
                    name: "ann".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn counts_sum_to_collection_size() {
        let names = ["a", "b", "c", "d"];
        for len in 0..40 {
            let authors: Vec<_> = (0..len)
                .map(|i| if i % 7 == 0 { None } else { Some(names[(i * 3) % 4]) })
                .collect();
            let posts = posts_by(&authors);
            let buckets = aggregate(&posts);

            assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), len);
            assert!(buckets.iter().all(|b| b.count >= 1));

            for post in &posts {
                let matching = buckets
                    .iter()
                    .filter(|b| b.name == post.author_label())
                    .count();
                assert_eq!(matching, 1);
            }
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let posts = posts_by(&[Some("a"), None, Some("b"), Some("a")]);
        assert_eq!(aggregate(&posts), aggregate(&posts));
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(color_for(0), "#0088FE");
        assert_eq!(color_for(5), "#EF4444");
        assert_eq!(color_for(6), "#0088FE");
        assert_eq!(color_for(13), "#00C49F");
    }
}
