//! JSON output formatting

use std::io;

use crate::tree::TreeNode;

/// Print tree node as pretty-printed JSON to stdout.
pub fn print_json(node: &TreeNode) -> io::Result<()> {
    let json = serde_json::to_string_pretty(node).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::tree::{Entry, TreeNode};

    #[test]
    fn test_json_shape() {
        let mut root = TreeNode::new();
        root.files.push(Entry::file("a.txt"));
        root.files.push(Entry::DepthLimit);
        root.subdirectories.insert("src".to_string(), TreeNode::new());

        let value = serde_json::to_value(&root).unwrap();
        assert_eq!(value["files"][0]["type"], "file");
        assert_eq!(value["files"][0]["name"], "a.txt");
        assert_eq!(value["files"][1]["type"], "depth_limit");
        assert!(value["subdirectories"]["src"].is_object());
    }
}
