//! The renderer contract: a depth-first walk over the document tree that
//! hands each part, together with its already-rendered children, to renderer
//! callbacks. A renderer may declare that some container's children must be
//! grouped by kind first (e.g. head rows vs body rows of a table), each group
//! rendered as a unit through a group handler in a fixed output order.

use crate::parts::{Part, PartKind};

/// Accumulation policy for rendered output: strings concatenate, vectors
/// collect structured fragments.
pub trait Fragment: Default {
    fn append(&mut self, other: Self);
}

impl Fragment for String {
    fn append(&mut self, other: Self) {
        self.push_str(&other);
    }
}

impl<T> Fragment for Vec<T> {
    fn append(&mut self, mut other: Self) {
        Vec::append(self, &mut other);
    }
}

/// Document-level data handed to [`Renderer::document`].
#[derive(Debug, Clone, Copy)]
pub struct RenderMeta<'a> {
    pub title: &'a str,
}

/// A consumer of the document tree.
///
/// `part` is the only required hook: it receives the node, the rendered
/// output of its children, the stack of ancestor nodes, and the node's
/// position among its siblings, and returns the node's own fragment.
pub trait Renderer {
    type Fragment: Fragment;

    /// Called before a part's children are rendered.
    fn pre_part(
        &mut self,
        _part: &Part,
        _ancestors: &[&Part],
        _index: usize,
        _sibling_count: usize,
    ) {
    }

    fn part(
        &mut self,
        part: &Part,
        children: Self::Fragment,
        ancestors: &[&Part],
        index: usize,
        sibling_count: usize,
    ) -> Self::Fragment;

    /// Child kinds to group under this container, with their output order.
    /// Kinds absent from the returned list are not rendered at all.
    fn group(&self, _container: &Part) -> Option<&[(PartKind, i32)]> {
        None
    }

    /// Wraps one rendered group of same-kind children.
    fn group_part(
        &mut self,
        _container: &Part,
        _kind: PartKind,
        children: Self::Fragment,
        _ancestors: &[&Part],
    ) -> Self::Fragment {
        children
    }

    /// Called once with the fully rendered tree.
    fn document(&mut self, _meta: RenderMeta<'_>, content: Self::Fragment) -> Self::Fragment {
        content
    }
}

pub(crate) fn render_parts<'a, R: Renderer>(
    renderer: &mut R,
    parts: &'a [Part],
    ancestors: &mut Vec<&'a Part>,
) -> R::Fragment {
    let refs: Vec<&Part> = parts.iter().collect();
    render_list(renderer, &refs, ancestors)
}

fn render_list<'a, R: Renderer>(
    renderer: &mut R,
    parts: &[&'a Part],
    ancestors: &mut Vec<&'a Part>,
) -> R::Fragment {
    let mut output = R::Fragment::default();
    let sibling_count = parts.len();

    for (index, part) in parts.iter().copied().enumerate() {
        renderer.pre_part(part, ancestors, index, sibling_count);

        let mut children_output = R::Fragment::default();

        if part.is_container() {
            let handled = renderer.group(part).map(|kinds| kinds.to_vec());

            if let Some(handled) = handled {
                for (kind, bucket) in group_children_by_kind(part.children(), &handled) {
                    ancestors.push(part);
                    let bucket_output = render_list(renderer, &bucket, ancestors);
                    ancestors.pop();
                    children_output.append(renderer.group_part(part, kind, bucket_output, ancestors));
                }
            } else {
                ancestors.push(part);
                children_output = render_parts(renderer, part.children(), ancestors);
                ancestors.pop();
            }
        }

        output.append(renderer.part(part, children_output, ancestors, index, sibling_count));
    }

    output
}

/// Buckets children by kind, preserving first-seen bucket order and each
/// bucket's internal order, then sorts buckets by declared order and drops
/// kinds the renderer did not declare.
fn group_children_by_kind<'a>(
    children: &'a [Part],
    handled: &[(PartKind, i32)],
) -> Vec<(PartKind, Vec<&'a Part>)> {
    let mut buckets: Vec<(PartKind, Vec<&'a Part>, i32)> = Vec::new();

    for child in children {
        let kind = child.kind();
        match buckets.iter_mut().find(|(k, _, _)| *k == kind) {
            Some((_, bucket, _)) => bucket.push(child),
            None => {
                let order = handled.iter().find(|(k, _)| *k == kind).map_or(0, |(_, o)| *o);
                buckets.push((kind, vec![child], order));
            }
        }
    }

    buckets.sort_by_key(|(_, _, order)| *order);

    buckets
        .into_iter()
        .filter(|(kind, _, _)| handled.iter().any(|(k, _)| k == kind))
        .map(|(kind, bucket, _)| (kind, bucket))
        .collect()
}
