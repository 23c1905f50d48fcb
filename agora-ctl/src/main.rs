use agora_client::{
    api::{CommentEdit, CommentId, ContentId, ContentKind, NewComment, Reaction, Role, SortBy},
    gate, Access, Comment, CommentStore, ThreadCache,
};
use agora_sync::{fetch_op, Coordinator, HttpBackend};
use anyhow::bail;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Backend base url, e.g. https://api.example.org
    #[structopt(short, long)]
    host: String,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Fetch and print a content item's comment tree
    Show {
        content_id: String,

        #[structopt(short, long, default_value = "session")]
        kind: ContentKind,

        #[structopt(short, long, default_value = "newest")]
        sort: SortBy,

        /// Check this role against the content kind before fetching
        #[structopt(short, long)]
        role: Option<Role>,

        #[structopt(long, default_value = "1")]
        page: u32,

        #[structopt(long, default_value = "50")]
        limit: u32,
    },

    /// Post a comment, or a reply with --parent
    Post {
        content_id: String,
        text: String,

        #[structopt(short, long, default_value = "session")]
        kind: ContentKind,

        #[structopt(long)]
        parent: Option<String>,
    },

    /// Replace a comment's text
    Edit {
        content_id: String,
        comment_id: String,
        text: String,

        #[structopt(short, long, default_value = "session")]
        kind: ContentKind,
    },

    /// Delete a comment (and, server-side, its replies)
    Delete {
        content_id: String,
        comment_id: String,

        #[structopt(short, long, default_value = "session")]
        kind: ContentKind,
    },

    /// Toggle a like or dislike on a comment
    React {
        content_id: String,
        comment_id: String,
        reaction: Reaction,

        #[structopt(short, long, default_value = "session")]
        kind: ContentKind,
    },
}

fn auth_token() -> Option<String> {
    std::env::var("AUTH_TOKEN").ok()
}

fn print_comment(c: &Comment, depth: usize) {
    let indent = "  ".repeat(depth);
    let edited = if c.is_edited() { " (edited)" } else { "" };
    println!(
        "{indent}{} [{:+}] <{}> {}: {}{}",
        c.created_at.format("%Y-%m-%d %H:%M"),
        c.score(),
        c.author.0,
        c.id.0,
        c.content,
        edited,
    );
    for r in &c.replies {
        print_comment(r, depth + 1);
    }
}

fn print_notifications(store: &CommentStore) {
    for n in store.notifications() {
        println!("{}", n.message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    let backend = HttpBackend::new(opt.host.clone(), auth_token());
    let mut coordinator = Coordinator::new(backend);

    match opt.cmd {
        Command::Show {
            content_id,
            kind,
            sort,
            role,
            page,
            limit,
        } => {
            if let Some(role) = role {
                if gate::check(kind, Some(role)) == Access::Denied {
                    println!("You do not have permission to view these comments.");
                    return Ok(());
                }
            }
            let content = ContentId(content_id);
            coordinator.refresh(&content, kind, page, limit).await;
            if let Some(err) = coordinator.store().error(&fetch_op(&content)) {
                bail!("failed to fetch comments: {err}");
            }
            println!("{} comments", coordinator.store().count(&content));
            let mut cache = ThreadCache::new();
            for c in cache.threaded(coordinator.store(), &content, sort).iter() {
                print_comment(c, 0);
            }
        }
        Command::Post {
            content_id,
            text,
            kind,
            parent,
        } => {
            let content = ContentId(content_id);
            coordinator
                .create(
                    &content,
                    kind,
                    NewComment {
                        content: text,
                        parent_comment_id: parent.map(CommentId),
                    },
                )
                .await;
            print_notifications(coordinator.store());
        }
        Command::Edit {
            content_id,
            comment_id,
            text,
            kind,
        } => {
            let content = ContentId(content_id);
            coordinator
                .edit(
                    &content,
                    kind,
                    &CommentId(comment_id),
                    CommentEdit { content: text },
                )
                .await;
            print_notifications(coordinator.store());
        }
        Command::Delete {
            content_id,
            comment_id,
            kind,
        } => {
            let content = ContentId(content_id);
            coordinator.delete(&content, kind, &CommentId(comment_id)).await;
            print_notifications(coordinator.store());
        }
        Command::React {
            content_id,
            comment_id,
            reaction,
            kind,
        } => {
            let content = ContentId(content_id);
            let comment = CommentId(comment_id);
            coordinator.react(&content, kind, &comment, reaction).await;
            print_notifications(coordinator.store());
        }
    }

    Ok(())
}
