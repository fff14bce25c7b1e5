//! Documentation flattener
//!
//! Collapses a root Markdown document and the documents it links to into one
//! directory:
//! 1. Copy the source tree to a scratch location
//! 2. Copy the root document as-is
//! 3. For each referenced document, prefix every file in its directory (its
//!    asset group) with the group discriminator, rewrite the document text to
//!    match, and copy the whole group into the flat directory
//!
//! The scratch directories are owned by the returned [`FlattenedDocs`] and
//! disappear with it, or immediately if flattening fails.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{DocpackError, IoResultExt, Result};
use crate::core::paths::{clean_path, file_name_string, join_normalized, make_relative};
use crate::core::util::copy_entry;
use crate::docs::references::find_references;
use crate::docs::rewrite::{normalize_img_tags, prefix_siblings, prefixed_name};
use crate::docs::scratch::ScratchSpace;
use crate::docs::MatchMode;

/// Files co-located with a referenced document, renamed together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetGroup {
    pub discriminator: usize,
    /// Directory relative to the source tree ('' for the top level)
    pub source_dir: String,
    /// Original entry names, sorted
    pub files: Vec<String>,
}

/// One document in render order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatDocument {
    /// Name in the flat directory
    pub name: String,
    /// Path relative to the source tree
    pub source: String,
    /// None for the root document
    pub group: Option<usize>,
}

/// Result of a flatten run; owns the scratch directories
#[derive(Debug)]
pub struct FlattenedDocs {
    documents: Vec<FlatDocument>,
    groups: Vec<AssetGroup>,
    scratch: ScratchSpace,
}

impl FlattenedDocs {
    /// Documents in render order: root first, then discovery order
    pub fn documents(&self) -> &[FlatDocument] {
        &self.documents
    }

    /// Flat directory names of the documents, in render order
    pub fn document_names(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.name.clone()).collect()
    }

    /// Asset groups in discriminator order
    pub fn groups(&self) -> &[AssetGroup] {
        &self.groups
    }

    /// Flat entries that are not in the document list, by group
    pub fn assets(&self) -> Vec<(usize, String, String)> {
        let documents: HashSet<&str> = self.documents.iter().map(|d| d.name.as_str()).collect();
        self.groups
            .iter()
            .flat_map(|group| {
                group.files.iter().map(move |file| {
                    let source = if group.source_dir.is_empty() {
                        file.clone()
                    } else {
                        format!("{}/{}", group.source_dir, file)
                    };
                    (
                        group.discriminator,
                        prefixed_name(group.discriminator, file),
                        source,
                    )
                })
            })
            .filter(|(_, name, _)| !documents.contains(name.as_str()))
            .collect()
    }

    /// The flattened directory; valid while `self` is alive
    pub fn dir(&self) -> &Path {
        self.scratch.flat_dir()
    }

    /// Copy the flattened directory to `dest`, creating it if needed
    pub fn persist_to(&self, dest: &Path) -> Result<()> {
        fs::create_dir_all(dest).at(dest)?;
        copy_entry(self.dir(), dest)
    }
}

/// Flattens a documentation tree rooted at one Markdown document
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    mode: MatchMode,
    scratch_parent: Option<PathBuf>,
}

impl Flattener {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            scratch_parent: None,
        }
    }

    /// Create scratch directories under `parent` instead of the system temp dir
    #[allow(dead_code)]
    pub fn with_scratch_parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.scratch_parent = Some(parent.into());
        self
    }

    /// Flatten `root_document` (relative to `source_tree`, or absolute inside it)
    pub fn flatten(&self, root_document: &Path, source_tree: &Path) -> Result<FlattenedDocs> {
        let relative_root = if root_document.is_absolute() {
            root_document
                .strip_prefix(source_tree)
                .map_err(|_| DocpackError::ReferenceOutsideTree {
                    reference: root_document.display().to_string(),
                })?
                .to_path_buf()
        } else {
            root_document.to_path_buf()
        };

        let scratch = ScratchSpace::create(self.scratch_parent.as_deref())?;
        copy_entry(source_tree, scratch.source_dir())?;

        let mut run = FlattenRun {
            mode: self.mode,
            source_tree,
            scratch_source: clean_path(scratch.source_dir())
                .unwrap_or_else(|| scratch.source_dir().to_path_buf()),
            flat_dir: scratch.flat_dir(),
            documents: Vec::new(),
            groups: Vec::new(),
            group_by_dir: HashMap::new(),
            processed: HashSet::new(),
            claimed: HashMap::new(),
        };
        run.process(&relative_root)?;

        let FlattenRun {
            documents, groups, ..
        } = run;

        tracing::info!(
            "Flattened {} documents from {} asset groups",
            documents.len(),
            groups.len()
        );

        Ok(FlattenedDocs {
            documents,
            groups,
            scratch,
        })
    }
}

/// State of one flatten run over an already-copied scratch tree
struct FlattenRun<'a> {
    mode: MatchMode,
    source_tree: &'a Path,
    scratch_source: PathBuf,
    flat_dir: &'a Path,
    documents: Vec<FlatDocument>,
    groups: Vec<AssetGroup>,
    group_by_dir: HashMap<PathBuf, usize>,
    processed: HashSet<PathBuf>,
    /// Flat name to the scratch file that owns it
    claimed: HashMap<String, PathBuf>,
}

impl FlattenRun<'_> {
    fn process(&mut self, relative_root: &Path) -> Result<()> {
        let root_path = clean_path(&self.scratch_source.join(relative_root))
            .filter(|p| p.starts_with(&self.scratch_source))
            .ok_or_else(|| DocpackError::ReferenceOutsideTree {
                reference: relative_root.display().to_string(),
            })?;
        let root_name = file_name_string(&root_path).ok_or_else(|| {
            DocpackError::io(
                self.origin(&root_path),
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file"),
            )
        })?;

        let text = fs::read_to_string(&root_path).at(self.origin(&root_path))?;
        self.claim(root_name.clone(), root_path.clone())?;
        fs::copy(&root_path, self.flat_dir.join(&root_name)).at(self.origin(&root_path))?;
        self.documents.push(FlatDocument {
            name: root_name,
            source: self.relative(&root_path),
            group: None,
        });
        self.processed.insert(root_path.clone());

        let base_dir = root_path
            .parent()
            .unwrap_or(&self.scratch_source)
            .to_path_buf();

        for reference in find_references(&text, self.mode) {
            self.process_reference(&base_dir, &reference)?;
        }

        Ok(())
    }

    fn process_reference(&mut self, base_dir: &Path, reference: &str) -> Result<()> {
        let resolved = clean_path(&join_normalized(base_dir, reference))
            .filter(|p| p.starts_with(&self.scratch_source))
            .ok_or_else(|| DocpackError::ReferenceOutsideTree {
                reference: reference.to_string(),
            })?;

        if self.processed.contains(&resolved) {
            tracing::debug!("Skipping repeated reference {}", reference);
            return Ok(());
        }
        if !resolved.is_file() {
            return Err(DocpackError::MissingReference {
                reference: reference.to_string(),
                resolved: self.origin(&resolved),
            });
        }

        let (Some(dir), Some(doc_name)) = (resolved.parent(), file_name_string(&resolved)) else {
            return Err(DocpackError::MissingReference {
                reference: reference.to_string(),
                resolved: self.origin(&resolved),
            });
        };
        let dir = dir.to_path_buf();

        let (index, new_group) = match self.group_by_dir.get(&dir) {
            Some(&index) => (index, false),
            None => (self.open_group(&dir)?, true),
        };
        let discriminator = self.groups[index].discriminator;

        let text = fs::read_to_string(&resolved).at(self.origin(&resolved))?;
        let prefixed = prefix_siblings(&text, &self.groups[index].files, discriminator, self.mode)
            .map_err(|source| DocpackError::Pattern {
                document: self.origin(&resolved),
                source,
            })?;
        fs::write(&resolved, normalize_img_tags(&prefixed)).at(self.origin(&resolved))?;

        if new_group {
            let files = self.groups[index].files.clone();
            for file in &files {
                self.claim(prefixed_name(discriminator, file), dir.join(file))?;
            }
            for file in &files {
                copy_entry(
                    &dir.join(file),
                    &self.flat_dir.join(prefixed_name(discriminator, file)),
                )?;
            }
        } else {
            let name = prefixed_name(discriminator, &doc_name);
            self.claim(name.clone(), resolved.clone())?;
            copy_entry(&resolved, &self.flat_dir.join(name))?;
        }

        self.documents.push(FlatDocument {
            name: prefixed_name(discriminator, &doc_name),
            source: self.relative(&resolved),
            group: Some(discriminator),
        });
        self.processed.insert(resolved);

        Ok(())
    }

    /// Reserve a flat directory name for `source`.
    ///
    /// A name already taken by another source file is a hard stop: group 1's
    /// `1a.png` and group 11's `a.png` both flatten to `11a.png`.
    fn claim(&mut self, name: String, source: PathBuf) -> Result<()> {
        match self.claimed.get(&name) {
            Some(first) if *first != source => Err(DocpackError::NameCollision {
                name,
                first: self.origin(first),
                second: self.origin(&source),
            }),
            Some(_) => Ok(()),
            None => {
                self.claimed.insert(name, source);
                Ok(())
            }
        }
    }

    /// Assign the next discriminator to `dir` and record its entries
    fn open_group(&mut self, dir: &Path) -> Result<usize> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).at(self.origin(dir))? {
            let entry = entry.at(self.origin(dir))?;
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
        files.sort();

        let discriminator = self.groups.len();
        let group = AssetGroup {
            discriminator,
            source_dir: self.relative(dir),
            files,
        };
        tracing::debug!(
            discriminator,
            dir = %group.source_dir,
            files = group.files.len(),
            "Discovered asset group"
        );

        self.groups.push(group);
        self.group_by_dir.insert(dir.to_path_buf(), discriminator);
        Ok(discriminator)
    }

    /// Path relative to the source tree, '/'-separated
    fn relative(&self, scratch_path: &Path) -> String {
        make_relative(scratch_path, &self.scratch_source).unwrap_or_default()
    }

    /// Where a scratch path came from in the original source tree
    fn origin(&self, scratch_path: &Path) -> PathBuf {
        match scratch_path.strip_prefix(&self.scratch_source) {
            Ok(relative) => self.source_tree.join(relative),
            Err(_) => scratch_path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    fn flat_listing(docs: &FlattenedDocs) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(docs.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Documentation tree plus a private scratch parent
    fn setup() -> (TempDir, PathBuf, Flattener) {
        let temp = tempdir().unwrap();
        let tree = temp.path().join("Documentation");
        let scratch = temp.path().join("scratch");
        fs::create_dir_all(&tree).unwrap();
        fs::create_dir_all(&scratch).unwrap();
        let flattener = Flattener::new(MatchMode::Loose).with_scratch_parent(scratch);
        (temp, tree, flattener)
    }

    #[test]
    fn test_root_without_references() {
        let (_temp, tree, flattener) = setup();
        write_file(&tree.join("Documentation.md"), "# Manual\n\nNo links here.\n");

        let docs = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap();

        assert_eq!(docs.document_names(), vec!["Documentation.md"]);
        assert!(docs.groups().is_empty());
        assert_eq!(flat_listing(&docs), vec!["Documentation.md"]);
    }

    #[test]
    fn test_sub_page_with_diagram() {
        let (_temp, tree, flattener) = setup();
        let root_text = "# Manual\n\n[See also](sub/page.md)\n";
        write_file(&tree.join("Documentation.md"), root_text);
        write_file(&tree.join("sub/page.md"), "# Page\n\n![](diagram.png)\n");
        write_file(&tree.join("sub/diagram.png"), "PNG");

        let docs = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap();

        assert_eq!(docs.document_names(), vec!["Documentation.md", "0page.md"]);
        assert_eq!(
            flat_listing(&docs),
            vec!["0diagram.png", "0page.md", "Documentation.md"]
        );
        assert_eq!(read(&docs.dir().join("Documentation.md")), root_text);
        assert!(read(&docs.dir().join("0page.md")).contains("![](0diagram.png)"));
        assert_eq!(read(&docs.dir().join("0diagram.png")), "PNG");

        assert_eq!(
            docs.assets(),
            vec![(0, "0diagram.png".to_string(), "sub/diagram.png".to_string())]
        );
        assert_eq!(docs.documents()[1].source, "sub/page.md");
        assert_eq!(docs.documents()[1].group, Some(0));
    }

    #[test]
    fn test_same_asset_name_in_two_directories() {
        let (_temp, tree, flattener) = setup();
        write_file(
            &tree.join("Documentation.md"),
            "[A](a/intro.md)\n[B](b/usage.md)\n",
        );
        write_file(&tree.join("a/intro.md"), "![](image.png)");
        write_file(&tree.join("a/image.png"), "A");
        write_file(&tree.join("b/usage.md"), "![](image.png)");
        write_file(&tree.join("b/image.png"), "B");

        let docs = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap();

        assert_eq!(
            docs.document_names(),
            vec!["Documentation.md", "0intro.md", "1usage.md"]
        );
        assert_eq!(read(&docs.dir().join("0image.png")), "A");
        assert_eq!(read(&docs.dir().join("1image.png")), "B");
        assert_eq!(read(&docs.dir().join("0intro.md")), "![](0image.png)");
        assert_eq!(read(&docs.dir().join("1usage.md")), "![](1image.png)");
    }

    #[test]
    fn test_discriminators_strictly_increase_in_discovery_order() {
        let (_temp, tree, flattener) = setup();
        write_file(
            &tree.join("Documentation.md"),
            "[z](z/last.md) [a](a/first.md) [m](m/mid.md)",
        );
        write_file(&tree.join("z/last.md"), "z");
        write_file(&tree.join("a/first.md"), "a");
        write_file(&tree.join("m/mid.md"), "m");

        let docs = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap();

        let discriminators: Vec<_> = docs.groups().iter().map(|g| g.discriminator).collect();
        assert_eq!(discriminators, vec![0, 1, 2]);
        let dirs: Vec<_> = docs.groups().iter().map(|g| g.source_dir.as_str()).collect();
        assert_eq!(dirs, vec!["z", "a", "m"]);
        assert_eq!(
            docs.document_names(),
            vec!["Documentation.md", "0last.md", "1first.md", "2mid.md"]
        );
    }

    #[test]
    fn test_img_tag_normalized_after_prefixing() {
        let (_temp, tree, flattener) = setup();
        write_file(&tree.join("Documentation.md"), "[x](guide/x.md)");
        write_file(
            &tree.join("guide/x.md"),
            "<img src=\"foo.png\" width=\"400\">\n",
        );
        write_file(&tree.join("guide/foo.png"), "F");

        let docs = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap();

        assert_eq!(read(&docs.dir().join("0x.md")), "![](0foo.png)\n");
    }

    #[test]
    fn test_repeated_reference_visited_once() {
        let (_temp, tree, flattener) = setup();
        write_file(
            &tree.join("Documentation.md"),
            "[a](sub/page.md) then [again](sub/page.md)",
        );
        write_file(&tree.join("sub/page.md"), "page");

        let docs = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap();

        assert_eq!(docs.document_names(), vec!["Documentation.md", "0page.md"]);
        assert_eq!(docs.groups().len(), 1);
    }

    #[test]
    fn test_second_document_in_visited_group_reuses_discriminator() {
        let (_temp, tree, flattener) = setup();
        write_file(
            &tree.join("Documentation.md"),
            "[one](sub/one.md) [other](other/x.md) [two](sub/two.md)",
        );
        write_file(&tree.join("sub/one.md"), "see two.md");
        write_file(&tree.join("sub/two.md"), "![](pic.png) and one.md");
        write_file(&tree.join("sub/pic.png"), "P");
        write_file(&tree.join("other/x.md"), "x");

        let docs = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap();

        assert_eq!(
            docs.document_names(),
            vec!["Documentation.md", "0one.md", "1x.md", "0two.md"]
        );
        assert_eq!(docs.groups().len(), 2);
        assert_eq!(read(&docs.dir().join("0one.md")), "see 0two.md");
        assert_eq!(
            read(&docs.dir().join("0two.md")),
            "![](0pic.png) and 0one.md"
        );
    }

    #[test]
    fn test_directory_sibling_copied_recursively() {
        let (_temp, tree, flattener) = setup();
        write_file(&tree.join("Documentation.md"), "[g](guide/g.md)");
        write_file(&tree.join("guide/g.md"), "![](images/a.png)");
        write_file(&tree.join("guide/images/a.png"), "A");

        let docs = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap();

        assert_eq!(read(&docs.dir().join("0g.md")), "![](0images/a.png)");
        assert_eq!(read(&docs.dir().join("0images/a.png")), "A");
    }

    #[test]
    fn test_source_tree_is_not_modified() {
        let (_temp, tree, flattener) = setup();
        write_file(&tree.join("Documentation.md"), "[p](sub/page.md)");
        write_file(&tree.join("sub/page.md"), "![](d.png)");
        write_file(&tree.join("sub/d.png"), "D");

        let _docs = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap();

        assert_eq!(read(&tree.join("sub/page.md")), "![](d.png)");
        assert!(!tree.join("sub/0d.png").exists());
    }

    #[test]
    fn test_scratch_removed_after_drop() {
        let (temp, tree, flattener) = setup();
        write_file(&tree.join("Documentation.md"), "[p](sub/page.md)");
        write_file(&tree.join("sub/page.md"), "p");

        let docs = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap();
        let flat = docs.dir().to_path_buf();
        assert!(flat.exists());
        drop(docs);

        assert!(!flat.exists());
        assert_eq!(fs::read_dir(temp.path().join("scratch")).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_reference_fails_and_cleans_up() {
        let (temp, tree, flattener) = setup();
        write_file(&tree.join("Documentation.md"), "[gone](sub/missing.md)");

        let err = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap_err();

        match err {
            DocpackError::MissingReference {
                reference,
                resolved,
            } => {
                assert_eq!(reference, "sub/missing.md");
                assert_eq!(resolved, tree.join("sub").join("missing.md"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fs::read_dir(temp.path().join("scratch")).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_root_document() {
        let (temp, tree, flattener) = setup();

        let err = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap_err();

        assert_eq!(err.code(), "IO_ERROR");
        assert!(err.to_string().contains("Documentation.md"));
        assert_eq!(fs::read_dir(temp.path().join("scratch")).unwrap().count(), 0);
    }

    #[test]
    fn test_reference_outside_tree_rejected() {
        let (temp, tree, flattener) = setup();
        write_file(&temp.path().join("secret.md"), "secret");
        write_file(&tree.join("Documentation.md"), "[x](../secret.md)");

        let err = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap_err();
        assert_eq!(err.code(), "REFERENCE_OUTSIDE_TREE");
    }

    #[test]
    fn test_strict_mode_ignores_prose_and_urls() {
        let (_temp, tree, _) = setup();
        let scratch = tree.parent().unwrap().join("scratch");
        let flattener = Flattener::new(MatchMode::Strict).with_scratch_parent(scratch);
        write_file(
            &tree.join("Documentation.md"),
            "Notes (see notes.md). [web](https://x.org/a.md) [ok](sub/page.md#intro)",
        );
        write_file(&tree.join("sub/page.md"), "The page.md file. ![](d.png)");
        write_file(&tree.join("sub/d.png"), "D");

        let docs = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap();

        assert_eq!(docs.document_names(), vec!["Documentation.md", "0page.md"]);
        assert_eq!(
            read(&docs.dir().join("0page.md")),
            "The page.md file. ![](0d.png)"
        );
    }

    #[test]
    fn test_persist_to_copies_flat_directory() {
        let (temp, tree, flattener) = setup();
        write_file(&tree.join("Documentation.md"), "[p](sub/page.md)");
        write_file(&tree.join("sub/page.md"), "p");
        write_file(&tree.join("sub/d.png"), "D");

        let out = temp.path().join("out");
        {
            let docs = flattener
                .flatten(Path::new("Documentation.md"), &tree)
                .unwrap();
            docs.persist_to(&out).unwrap();
        }

        assert!(out.join("Documentation.md").exists());
        assert!(out.join("0page.md").exists());
        assert_eq!(read(&out.join("0d.png")), "D");
    }

    #[test]
    fn test_absolute_root_document_inside_tree() {
        let (_temp, tree, flattener) = setup();
        write_file(&tree.join("Documentation.md"), "# only root");

        let docs = flattener
            .flatten(&tree.join("Documentation.md"), &tree)
            .unwrap();
        assert_eq!(docs.document_names(), vec!["Documentation.md"]);
    }

    /// Root linking `dNN/page.md` for every group index in `0..count`
    fn write_numbered_groups(tree: &Path, count: usize) {
        let links: String = (0..count)
            .map(|i| format!("[{i}](d{i:02}/page.md)\n"))
            .collect();
        write_file(&tree.join("Documentation.md"), &links);
        for i in 0..count {
            write_file(&tree.join(format!("d{i:02}/page.md")), "![](image.png)");
            write_file(&tree.join(format!("d{i:02}/image.png")), &format!("IMAGE {i}"));
        }
    }

    #[test]
    fn test_twelve_groups_without_overlap() {
        let (_temp, tree, flattener) = setup();
        write_numbered_groups(&tree, 12);

        let docs = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap();

        assert_eq!(docs.documents().len(), 13);
        assert_eq!(read(&docs.dir().join("1image.png")), "IMAGE 1");
        assert_eq!(read(&docs.dir().join("11image.png")), "IMAGE 11");
        assert_eq!(read(&docs.dir().join("11page.md")), "![](11image.png)");
    }

    #[test]
    fn test_prefixed_names_colliding_across_groups_fail() {
        let (temp, tree, flattener) = setup();
        write_numbered_groups(&tree, 12);
        write_file(&tree.join("d01/1a.png"), "FROM_GROUP_1");
        write_file(&tree.join("d11/a.png"), "FROM_GROUP_11");

        let err = flattener
            .flatten(Path::new("Documentation.md"), &tree)
            .unwrap_err();

        match err {
            DocpackError::NameCollision {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "11a.png");
                assert_eq!(first, tree.join("d01").join("1a.png"));
                assert_eq!(second, tree.join("d11").join("a.png"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fs::read_dir(temp.path().join("scratch")).unwrap().count(), 0);
    }
}
