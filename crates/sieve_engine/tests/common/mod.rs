#![allow(dead_code)]

use std::sync::Once;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sieve_logging::initialize_for_tests);
}

#[derive(Debug, Clone, Default)]
pub struct Tweet {
    pub text: Option<String>,
    pub photo: bool,
    pub video: bool,
    pub views: Option<String>,
    pub likes: Option<String>,
    pub reposts: Option<String>,
}

impl Tweet {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_photo(mut self) -> Self {
        self.photo = true;
        self
    }

    pub fn with_video(mut self) -> Self {
        self.video = true;
        self
    }

    pub fn with_likes(mut self, likes: &str) -> Self {
        self.likes = Some(likes.to_string());
        self
    }

    pub fn with_views(mut self, views: &str) -> Self {
        self.views = Some(views.to_string());
        self
    }

    pub fn with_reposts(mut self, reposts: &str) -> Self {
        self.reposts = Some(reposts.to_string());
        self
    }

    pub fn html(&self) -> String {
        let mut out = String::from(r#"<article data-testid="tweet"><div>"#);
        if let Some(text) = &self.text {
            out.push_str(&format!(r#"<div data-testid="tweetText" lang="en">{text}</div>"#));
        }
        if self.photo {
            out.push_str(r#"<div data-testid="tweetPhoto"><img src="p.jpg"></div>"#);
        }
        if self.video {
            out.push_str(r#"<div data-testid="videoPlayer"><video src="v.mp4"></video></div>"#);
        }
        out.push_str(r#"<div role="group">"#);
        out.push_str(r#"<button role="button" aria-label="Reply"><span>3</span></button>"#);
        if let Some(reposts) = &self.reposts {
            out.push_str(&format!(
                r#"<button role="button" aria-label="{reposts} reposts. Repost"><span>{reposts}</span></button>"#
            ));
        }
        if let Some(likes) = &self.likes {
            out.push_str(&format!(
                r#"<button role="button" aria-label="{likes} Likes. Like"><span>{likes}</span></button>"#
            ));
        }
        if let Some(views) = &self.views {
            out.push_str(&format!(
                r#"<a role="button" aria-label="{views} views. View post analytics"><span>{views}</span></a>"#
            ));
        }
        out.push_str("</div></div></article>");
        out
    }
}

pub fn page(tweets: &[Tweet]) -> String {
    let body: String = tweets.iter().map(Tweet::html).collect();
    format!(
        r#"<html><head><title>Home</title></head><body><main><section id="timeline">{body}</section></main></body></html>"#
    )
}

pub fn fragment(tweets: &[Tweet]) -> String {
    tweets.iter().map(Tweet::html).collect()
}
