//! ### English
//! Free-list object pool for input events.
//!
//! ### 中文
//! 输入事件的空闲链表对象池。

/// ### English
/// Free-list pool with a preallocated initial capacity and a soft ceiling on retained objects.
///
/// `obtain` pops a recycled object (or creates one when the list is empty); `free` pushes it back
/// unless `max_free` objects are already retained.
///
/// ### 中文
/// 带预分配初始容量、并对保留对象数设软上限的空闲链表池。
///
/// `obtain` 弹出一个回收对象（空时新建）；`free` 将对象放回，除非已保留 `max_free` 个。
#[derive(Debug)]
pub struct EventPool<T> {
    free: Vec<T>,
    max_free: usize,
    created: usize,
}

impl<T: Default> EventPool<T> {
    /// ### English
    /// Creates a pool with `initial_capacity` objects ready to hand out.
    ///
    /// #### Parameters
    /// - `initial_capacity`: Objects preallocated up front.
    /// - `max_free`: Soft ceiling of retained free objects.
    ///
    /// ### 中文
    /// 创建一个预先准备好 `initial_capacity` 个对象的池。
    ///
    /// #### 参数
    /// - `initial_capacity`：预分配的对象数。
    /// - `max_free`：保留空闲对象的软上限。
    pub fn new(initial_capacity: usize, max_free: usize) -> Self {
        let max_free = max_free.max(initial_capacity);
        let mut free = Vec::with_capacity(initial_capacity);
        free.resize_with(initial_capacity, T::default);
        Self {
            free,
            max_free,
            created: initial_capacity,
        }
    }

    pub fn obtain(&mut self) -> T {
        match self.free.pop() {
            Some(object) => object,
            None => {
                self.created += 1;
                T::default()
            }
        }
    }

    pub fn free(&mut self, object: T) {
        if self.free.len() < self.max_free {
            self.free.push(object);
        }
    }

    /// ### English
    /// Returns every object yielded by `objects` to the pool.
    ///
    /// ### 中文
    /// 将 `objects` 产出的所有对象归还给池。
    pub fn free_all(&mut self, objects: impl IntoIterator<Item = T>) {
        for object in objects {
            self.free(object);
        }
    }

    /// ### English
    /// Objects currently retained for reuse.
    ///
    /// ### 中文
    /// 当前保留以供复用的对象数。
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// ### English
    /// Total objects ever created by this pool (preallocation included).
    ///
    /// ### 中文
    /// 此池创建过的对象总数（包括预分配）。
    #[inline]
    pub fn created(&self) -> usize {
        self.created
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_state_reuses_objects() {
        let mut pool: EventPool<u64> = EventPool::new(4, 8);
        for _ in 0..10 {
            let batch: Vec<u64> = (0..4).map(|_| pool.obtain()).collect();
            pool.free_all(batch);
        }
        assert_eq!(pool.created(), 4);
        assert_eq!(pool.free_count(), 4);
    }

    #[test]
    fn grows_on_demand_and_caps_retained_objects() {
        let mut pool: EventPool<u64> = EventPool::new(1, 2);
        let batch: Vec<u64> = (0..5).map(|_| pool.obtain()).collect();
        assert_eq!(pool.created(), 5);
        pool.free_all(batch);
        assert_eq!(pool.free_count(), 2);
    }
}
