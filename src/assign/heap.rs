/// Heap struct for selecting decision vars
use {super::AssignStack, crate::types::*, std::fmt};

/// Heap of VarId, based on var activity.
/// The var with the highest activity comes first; ties go to the lower index.
///
/// # Note
/// - `heap` holds every var; the first `idxs[0]` slots (from 1) are the live part.
/// - `idxs[0]` contains the number of alive elements.
///   `idxs` maps vars to positions, so the unused field 0 can hold the size as a special case.
#[derive(Clone, Debug, Default)]
pub struct VarIdHeap {
    /// order : usize -> VarId
    heap: Vec<VarId>,
    /// VarId : -> order : usize
    idxs: Vec<usize>,
}

impl fmt::Display for VarIdHeap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            " - seek pointer - nth -> var: {:?}\n - var -> nth: {:?}",
            self.heap, self.idxs,
        )
    }
}

/// Internal heap manipulation API
pub trait VarHeapIF {
    fn update_heap(&mut self, v: VarId);
    fn insert_heap(&mut self, vi: VarId);
    fn get_heap_root(&mut self) -> VarId;
    fn percolate_up(&mut self, start: usize);
    fn percolate_down(&mut self, start: usize);
}

impl AssignStack {
    /// return `true` if `a` should be placed above `b`.
    #[inline]
    fn precedes(&self, a: VarId, b: VarId) -> bool {
        let aa = self.var[a].activity;
        let ab = self.var[b].activity;
        ab < aa || (aa == ab && a < b)
    }
}

impl VarHeapIF for AssignStack {
    fn update_heap(&mut self, v: VarId) {
        debug_assert!(v != 0, "Invalid VarId");
        if self.var_order.contains(v) {
            let start = self.var_order.idxs[v];
            self.percolate_up(start);
        }
    }
    fn insert_heap(&mut self, vi: VarId) {
        if self.var_order.contains(vi) {
            let i = self.var_order.idxs[vi];
            self.percolate_up(i);
            return;
        }
        let i = self.var_order.idxs[vi];
        let n = self.var_order.idxs[0] + 1;
        let vn = self.var_order.heap[n];
        self.var_order.heap.swap(i, n);
        self.var_order.idxs.swap(vi, vn);
        self.var_order.idxs[0] = n;
        self.percolate_up(n);
    }
    fn get_heap_root(&mut self) -> VarId {
        let s = 1;
        let vs = self.var_order.heap[s];
        let n = self.var_order.idxs[0];
        let vn = self.var_order.heap[n];
        debug_assert!(vn != 0, "Invalid VarId for heap");
        debug_assert!(vs != 0, "Invalid VarId for heap");
        self.var_order.heap.swap(n, s);
        self.var_order.idxs.swap(vn, vs);
        self.var_order.idxs[0] -= 1;
        if 1 < self.var_order.idxs[0] {
            self.percolate_down(1);
        }
        vs
    }
    fn percolate_up(&mut self, start: usize) {
        let mut q = start;
        let vq = self.var_order.heap[q];
        debug_assert!(0 < vq, "size of heap is too small");
        loop {
            let p = q / 2;
            if p == 0 {
                break;
            }
            let vp = self.var_order.heap[p];
            if self.precedes(vq, vp) {
                // move down the current parent, and make it empty
                self.var_order.heap[q] = vp;
                self.var_order.idxs[vp] = q;
                q = p;
            } else {
                break;
            }
        }
        self.var_order.heap[q] = vq;
        self.var_order.idxs[vq] = q;
    }
    fn percolate_down(&mut self, start: usize) {
        let n = self.var_order.len();
        let mut i = start;
        let vi = self.var_order.heap[i];
        loop {
            let l = 2 * i; // left
            if n < l {
                break;
            }
            let vl = self.var_order.heap[l];
            let r = l + 1; // right
            let (target, vc) = if r <= n && self.precedes(self.var_order.heap[r], vl) {
                (r, self.var_order.heap[r])
            } else {
                (l, vl)
            };
            if self.precedes(vc, vi) {
                self.var_order.heap[i] = vc;
                self.var_order.idxs[vc] = i;
                i = target;
            } else {
                break;
            }
        }
        debug_assert!(vi != 0, "invalid index");
        self.var_order.heap[i] = vi;
        self.var_order.idxs[vi] = i;
    }
}

/// API on the heap itself
pub trait VarOrderIF {
    fn new(n: usize, init: usize) -> VarIdHeap;
    fn clear(&mut self);
    fn contains(&self, v: VarId) -> bool;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
    /// append a var as the last, non-alive element.
    fn push_var(&mut self, vi: VarId);
}

impl VarOrderIF for VarIdHeap {
    fn new(n: usize, init: usize) -> VarIdHeap {
        let mut heap = Vec::with_capacity(n + 1);
        let mut idxs = Vec::with_capacity(n + 1);
        heap.push(0);
        idxs.push(n);
        for i in 1..=n {
            heap.push(i);
            idxs.push(i);
        }
        idxs[0] = init;
        VarIdHeap { heap, idxs }
    }
    fn clear(&mut self) {
        for i in 0..self.idxs.len() {
            self.idxs[i] = i;
            self.heap[i] = i;
        }
        self.idxs[0] = 0;
    }
    fn contains(&self, v: VarId) -> bool {
        self.idxs[v] <= self.idxs[0]
    }
    fn len(&self) -> usize {
        self.idxs[0]
    }
    fn is_empty(&self) -> bool {
        self.idxs[0] == 0
    }
    fn push_var(&mut self, vi: VarId) {
        debug_assert_eq!(vi, self.heap.len());
        self.heap.push(vi);
        self.idxs.push(vi);
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::assign::VarActivityIF};

    #[test]
    fn test_heap_breaks_ties_by_index() {
        let config = Config::default();
        let mut asg = AssignStack::instantiate(&config, &CNFDescription::from(5));
        // all zero: the lowest index first
        assert_eq!(asg.get_heap_root(), 1);
        asg.insert_heap(1);
        asg.bump_activity(4);
        asg.bump_activity(2);
        asg.decay_activity();
        asg.bump_activity(5);
        // 5 got a larger bump after decay; 2 and 4 tie.
        assert_eq!(asg.get_heap_root(), 5);
        assert_eq!(asg.get_heap_root(), 2);
        assert_eq!(asg.get_heap_root(), 4);
        assert_eq!(asg.get_heap_root(), 1);
        assert_eq!(asg.get_heap_root(), 3);
        assert!(asg.var_order.is_empty());
    }

    #[test]
    fn test_heap_reinsertion() {
        let config = Config::default();
        let mut asg = AssignStack::instantiate(&config, &CNFDescription::from(3));
        let a = asg.get_heap_root();
        let b = asg.get_heap_root();
        assert_eq!((a, b), (1, 2));
        asg.insert_heap(2);
        asg.insert_heap(2);
        asg.insert_heap(1);
        assert_eq!(asg.var_order.len(), 3);
        assert_eq!(asg.get_heap_root(), 1);
        assert_eq!(asg.get_heap_root(), 2);
        assert_eq!(asg.get_heap_root(), 3);
    }
}
