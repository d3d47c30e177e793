use serde::{Deserialize, Serialize};

use crate::suggestion::Comment;

/// Plain text comment.
const COMMENT_TYPE_TEXT: u8 = 1;
/// Thread status `active`.
const THREAD_STATUS_ACTIVE: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub comments: Vec<ThreadComment>,
    pub status: u8,
    pub thread_context: ThreadContext,
    pub pull_request_thread_context: PullRequestThreadContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadComment {
    pub content: String,
    pub comment_type: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadContext {
    pub file_path: String,
    pub right_file_end: FilePosition,
    pub right_file_start: FilePosition,
}

/// One-based line and character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePosition {
    pub line: u32,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestThreadContext {
    pub change_tracking_id: u32,
    pub iteration_context: IterationContext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationContext {
    pub first_comparing_iteration: u32,
    pub second_comparing_iteration: u32,
}

/// Pull request iteration, as listed by the iterations endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Iteration {
    #[serde(default)]
    pub id: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationChanges {
    #[serde(default)]
    pub change_entries: Vec<ChangeEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEntry {
    #[serde(default)]
    pub change_tracking_id: Option<u32>,
    #[serde(default)]
    pub item: Option<ChangeItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChangeItem {
    #[serde(default)]
    pub path: Option<String>,
}

/// File path of `change` without its leading `/`.
pub fn item_path(change: &ChangeEntry) -> Option<&str> {
    let path = change.item.as_ref()?.path.as_deref()?;
    if path.is_empty() {
        return None;
    }
    Some(path.strip_prefix('/').unwrap_or(path))
}

pub fn transform_comment(
    comment: &Comment,
    iteration: u32,
    change_tracking_id: u32,
) -> CommentThread {
    CommentThread {
        comments: vec![ThreadComment {
            content: comment.body.clone(),
            comment_type: COMMENT_TYPE_TEXT,
        }],
        status: THREAD_STATUS_ACTIVE,
        thread_context: ThreadContext {
            file_path: comment.path.clone(),
            right_file_end: FilePosition {
                line: comment.line,
                offset: comment.line_length,
            },
            right_file_start: FilePosition {
                line: comment.first_line(),
                offset: 1,
            },
        },
        pull_request_thread_context: PullRequestThreadContext {
            change_tracking_id,
            iteration_context: IterationContext {
                first_comparing_iteration: iteration,
                second_comparing_iteration: iteration,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FIXTURE_PIPED;
    use crate::suggestion::make_comments;

    fn entry(path: Option<&str>) -> ChangeEntry {
        ChangeEntry {
            change_tracking_id: Some(1),
            item: Some(ChangeItem {
                path: path.map(str::to_string),
            }),
        }
    }

    #[test]
    fn test_item_path() {
        assert_eq!(item_path(&ChangeEntry::default()), None);
        assert_eq!(item_path(&entry(None)), None);
        assert_eq!(item_path(&entry(Some(""))), None);
        assert_eq!(item_path(&entry(Some("/"))), Some(""));
        assert_eq!(item_path(&entry(Some("/src/a.rs"))), Some("src/a.rs"));
        assert_eq!(item_path(&entry(Some("src/a.rs"))), Some("src/a.rs"));
        assert_eq!(item_path(&entry(Some("//src/a.rs"))), Some("/src/a.rs"));
    }

    #[test]
    fn test_deserialize_iteration_changes() {
        let changes: IterationChanges = serde_json::from_str(
            r#"{"changeEntries":[{"changeTrackingId":2,"changeId":2,"item":{"objectId":"abc","path":"/src/Graphics/VertexArray.h"}},{"changeId":3}]}"#,
        )
        .unwrap();
        assert_eq!(changes.change_entries.len(), 2);
        assert_eq!(changes.change_entries[0].change_tracking_id, Some(2));
        assert_eq!(
            item_path(&changes.change_entries[0]),
            Some("src/Graphics/VertexArray.h")
        );
        assert_eq!(item_path(&changes.change_entries[1]), None);

        let empty: IterationChanges = serde_json::from_str("{}").unwrap();
        assert!(empty.change_entries.is_empty());
    }

    #[test]
    fn test_transform_comment() {
        let comments = make_comments(FIXTURE_PIPED).unwrap();
        let thread = transform_comment(&comments[0], 3, 1);
        insta::assert_json_snapshot!(thread, @r###"
        {
          "comments": [
            {
              "content": "```suggestion\n      comments.push(makeComment(to === \"-\" ? from : to, chunk));\n```\n",
              "commentType": 1
            }
          ],
          "status": 1,
          "threadContext": {
            "filePath": "src/GitHubClient.js",
            "rightFileEnd": {
              "line": 95,
              "offset": 65
            },
            "rightFileStart": {
              "line": 95,
              "offset": 1
            }
          },
          "pullRequestThreadContext": {
            "changeTrackingId": 1,
            "iterationContext": {
              "firstComparingIteration": 3,
              "secondComparingIteration": 3
            }
          }
        }
        "###);
    }
}
